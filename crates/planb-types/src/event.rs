use serde::{Deserialize, Serialize};

use crate::{BillingPeriod, PlanRecord};

/// Notifications delivered to the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// The user picked a plan (click or keyboard)
    SelectionChanged { index: usize, plan: PlanRecord },

    BillingChanged { period: BillingPeriod },
}
