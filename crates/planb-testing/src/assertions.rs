//! Custom assertions for planb-specific validation.
//!
//! Provides high-level assertions that make tests more readable:
//! - Card order and active card checks on a `WidgetView`
//! - Selection notifications extracted from emitted events
//! - JSON shape checks for CLI output

use anyhow::{Context, Result};
use planb_runtime::WidgetView;
use planb_types::WidgetEvent;
use serde_json::Value;

/// Card names in display order.
pub fn card_names(view: &WidgetView) -> Vec<&str> {
    view.cards.iter().map(|card| card.name.as_str()).collect()
}

/// Indices carried by selection notifications, in emission order.
pub fn selection_indices(events: &[WidgetEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            WidgetEvent::SelectionChanged { index, .. } => Some(*index),
            _ => None,
        })
        .collect()
}

/// Assert that exactly one card is active and that it has the given name.
pub fn assert_active_card(view: &WidgetView, expected: &str) -> Result<()> {
    let active: Vec<&str> = view
        .cards
        .iter()
        .filter(|card| card.active)
        .map(|card| card.name.as_str())
        .collect();

    if active != [expected] {
        anyhow::bail!("Expected active card {:?}, got {:?}", expected, active);
    }

    Ok(())
}

/// Assert that CLI JSON output lists the given plan names in order.
pub fn assert_plan_names(json: &Value, expected: &[&str]) -> Result<()> {
    let plans = json["plans"]
        .as_array()
        .context("Expected 'plans' array in JSON")?;

    let names = plans
        .iter()
        .enumerate()
        .map(|(i, plan)| {
            plan["name"]
                .as_str()
                .with_context(|| format!("Plan {} missing name", i))
        })
        .collect::<Result<Vec<_>>>()?;

    if names != expected {
        anyhow::bail!("Expected plans {:?}, got {:?}", expected, names);
    }

    Ok(())
}
