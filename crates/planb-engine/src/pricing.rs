use planb_types::{BillingPeriod, PlanRecord};

/// Shown when a plan has neither price
pub const NO_PRICE: &str = "—";

/// Price label for a card.
///
/// The selected period's price wins; otherwise the other period's price is
/// shown with its own suffix so the card never claims a price it doesn't have.
pub fn price_label(plan: &PlanRecord, billing: BillingPeriod) -> String {
    let monthly = plan.monthly_price.map(|p| format!("${}/mo", p));
    let yearly = plan.yearly_price.map(|p| format!("${}/yr", p));

    let label = match billing {
        BillingPeriod::Monthly => monthly.or(yearly),
        BillingPeriod::Yearly => yearly.or(monthly),
    };
    label.unwrap_or_else(|| NO_PRICE.to_string())
}
