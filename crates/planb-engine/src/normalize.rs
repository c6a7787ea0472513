// Defensive normalization of raw plan payloads
//
// Malformed entries are never rejected: every field falls back to a default so
// one bad plan cannot blank the whole widget.

use planb_types::{FeatureDictionary, PlanAction, PlanCatalog, PlanRecord, UNNAMED_PLAN};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Normalize a parsed payload into a catalog with declared (unmerged) features.
///
/// - `plans` that is not an array yields no plans
/// - `features` that is not an object yields an empty dictionary
/// - `default_plan` counts only as a non-empty string
pub fn normalize(raw: &Value) -> PlanCatalog {
    let plans = raw
        .get("plans")
        .and_then(Value::as_array)
        .map(|plans| plans.iter().map(normalize_plan).collect())
        .unwrap_or_default();

    let features = raw
        .get("features")
        .and_then(Value::as_object)
        .map(normalize_features)
        .unwrap_or_default();

    PlanCatalog {
        plans,
        features,
        default_plan: non_empty_str(raw.get("default_plan")),
    }
}

fn normalize_plan(raw: &Value) -> PlanRecord {
    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(UNNAMED_PLAN)
        .to_string();

    let features = raw
        .get("features")
        .and_then(Value::as_array)
        .map(|features| dedup_preserving_order(features.iter().filter_map(Value::as_str)))
        .unwrap_or_default();

    PlanRecord {
        name,
        monthly_price: raw.get("monthly_price").and_then(Value::as_f64),
        yearly_price: raw.get("yearly_price").and_then(Value::as_f64),
        inherits: non_empty_str(raw.get("inherits")),
        description: raw
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        features,
        action: raw.get("action").and_then(normalize_action),
    }
}

fn normalize_action(raw: &Value) -> Option<PlanAction> {
    let name = raw.get("name")?.as_str()?;
    let url = raw.get("url")?.as_str()?;
    Some(PlanAction {
        name: name.to_string(),
        url: url.to_string(),
    })
}

fn normalize_features(raw: &Map<String, Value>) -> FeatureDictionary {
    raw.iter()
        .map(|(name, description)| (name.as_str(), description.as_str().unwrap_or_default()))
        .collect()
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Collect feature names, keeping the first occurrence of each
pub(crate) fn dedup_preserving_order<'a, I>(features: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    features
        .into_iter()
        .filter(|f| seen.insert(*f))
        .map(str::to_string)
        .collect()
}
