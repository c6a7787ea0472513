use planb_types::PlanRecord;

/// Pick the initially active plan after a load.
///
/// Priority:
/// 1. Plan named by the payload's `default_plan`
/// 2. Plan named by the embedding attribute
/// 3. Previous active index, if still in range
/// 4. First plan
///
/// Name lookups use the first match. An empty list yields 0 (inert).
pub fn pick_default_index(
    plans: &[PlanRecord],
    json_default: Option<&str>,
    attribute_default: Option<&str>,
    previous_index: Option<usize>,
) -> usize {
    let by_name = |name: Option<&str>| name.and_then(|n| plans.iter().position(|p| p.name == n));

    by_name(json_default)
        .or_else(|| by_name(attribute_default))
        .or_else(|| previous_index.filter(|&i| i < plans.len()))
        .unwrap_or(0)
}
