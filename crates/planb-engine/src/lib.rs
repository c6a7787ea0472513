// Engine module - Plan data resolution (normalization, inheritance, defaults)
// This layer sits between raw payloads and the selection runtime / render layer

pub mod default_plan;
pub mod inheritance;
pub mod layout;
pub mod normalize;
pub mod pricing;
pub mod view;

pub use default_plan::pick_default_index;
pub use inheritance::resolve_inheritance;
pub use layout::{DEFAULT_CAROUSEL_BREAKPOINT_PX, LayoutMode, nearest_card_index};
pub use normalize::normalize;
pub use pricing::price_label;
pub use view::{
    ComparisonColumn, ComparisonRow, ComparisonTable, PlanCardView, build_cards, build_comparison,
};

use planb_types::PlanCatalog;
use serde_json::Value;

// Façade API - Stable public interface for runtime and CLI layers

/// Normalize a raw payload and resolve feature inheritance in one pass
pub fn build_catalog(raw: &Value) -> PlanCatalog {
    let mut catalog = normalize(raw);
    resolve_inheritance(&mut catalog.plans);
    catalog
}
