// View models handed to the render layer
//
// These carry everything a template needs so rendering stays logic-free.

use planb_types::{BillingPeriod, FeatureDictionary, PlanAction, PlanRecord};
use serde::Serialize;

use crate::pricing::price_label;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanCardView {
    pub index: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_label: String,
    /// "Everything in <base>, and more" for plans that inherit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherits_note: Option<String>,
    pub features: Vec<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<PlanAction>,
}

pub fn build_cards(
    plans: &[PlanRecord],
    active_index: usize,
    billing: BillingPeriod,
) -> Vec<PlanCardView> {
    plans
        .iter()
        .enumerate()
        .map(|(index, plan)| PlanCardView {
            index,
            name: plan.name.clone(),
            description: (!plan.description.is_empty()).then(|| plan.description.clone()),
            price_label: price_label(plan, billing),
            inherits_note: plan
                .inherits
                .as_ref()
                .map(|base| format!("Everything in {}, and more", base)),
            features: plan.features.clone(),
            active: index == active_index,
            action: plan.action.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonColumn {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub feature: String,
    pub description: String,
    /// One entry per plan column
    pub included: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
}

/// Feature-by-plan matrix, or `None` when there is nothing to compare.
///
/// Rows follow the dictionary order; membership uses resolved features.
pub fn build_comparison(
    plans: &[PlanRecord],
    features: &FeatureDictionary,
    active_index: usize,
) -> Option<ComparisonTable> {
    if plans.is_empty() || features.is_empty() {
        return None;
    }

    let columns = plans
        .iter()
        .enumerate()
        .map(|(index, plan)| ComparisonColumn {
            name: plan.name.clone(),
            active: index == active_index,
        })
        .collect();

    let rows = features
        .iter()
        .map(|(name, description)| ComparisonRow {
            feature: name.to_string(),
            description: description.to_string(),
            included: plans.iter().map(|p| p.has_feature(name)).collect(),
        })
        .collect();

    Some(ComparisonTable { columns, rows })
}
