// Plain-text rendering of widget views
//
// Functions return strings so callers decide where output goes. Color is
// opt-in and only applied by the caller when stdout is a terminal.

use owo_colors::OwoColorize;
use planb_engine::{ComparisonTable, LayoutMode};
use planb_runtime::WidgetView;
use std::fmt::Write;

const INCLUDED: &str = "✓";
const EXCLUDED: &str = "·";

pub fn cards(view: &WidgetView, color: bool) -> String {
    let mut out = String::new();

    let layout = match view.layout {
        LayoutMode::Carousel => "carousel",
        LayoutMode::Grid => "grid",
    };
    let _ = writeln!(out, "Billing: {}  Layout: {}", view.billing, layout);

    if let Some(message) = &view.status_message {
        let _ = writeln!(out, "{}", message);
        if let Some(error) = &view.error {
            let _ = writeln!(out, "Error: {}", error);
        }
        return out;
    }

    for card in &view.cards {
        let marker = if card.active { "▶" } else { " " };
        let title = format!("{} {}", marker, card.name);
        let title = if card.active && color {
            title.green().bold().to_string()
        } else {
            title
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "{}  {}", title, card.price_label);

        if let Some(description) = &card.description {
            let _ = writeln!(out, "    {}", description);
        }
        if let Some(note) = &card.inherits_note {
            let note = if color {
                note.dimmed().to_string()
            } else {
                note.clone()
            };
            let _ = writeln!(out, "    {}", note);
        }
        for feature in &card.features {
            let _ = writeln!(out, "    {} {}", INCLUDED, feature);
        }
        if let Some(action) = &card.action {
            let _ = writeln!(out, "    → {} ({})", action.name, action.url);
        }
    }

    out
}

pub fn comparison(table: &ComparisonTable, color: bool) -> String {
    let mut out = String::new();

    let feature_width = table
        .rows
        .iter()
        .map(|row| row.feature.chars().count())
        .chain(std::iter::once("Feature".len()))
        .max()
        .unwrap_or_default();

    let headers: Vec<String> = table
        .columns
        .iter()
        .map(|column| {
            if column.active {
                format!("*{}", column.name)
            } else {
                column.name.clone()
            }
        })
        .collect();
    let widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    let _ = write!(out, "{:<feature_width$}", "Feature");
    for header in &headers {
        let header = if color && header.starts_with('*') {
            header.green().bold().to_string()
        } else {
            header.clone()
        };
        let _ = write!(out, "  {}", header);
    }
    let _ = writeln!(out);

    for row in &table.rows {
        let _ = write!(out, "{:<feature_width$}", row.feature);
        for (included, width) in row.included.iter().zip(&widths) {
            let mark = if *included { INCLUDED } else { EXCLUDED };
            let _ = write!(out, "  {:^width$}", mark, width = *width);
        }
        let _ = writeln!(out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use planb_engine::{build_cards, build_comparison};
    use planb_runtime::LoadStatus;
    use planb_types::{BillingPeriod, FeatureDictionary, PlanRecord};

    fn plans() -> Vec<PlanRecord> {
        vec![
            PlanRecord::new("Free").with_features(["projects"]),
            PlanRecord::new("Pro")
                .inheriting("Free")
                .with_features(["projects", "sso"]),
        ]
    }

    fn view(plans: &[PlanRecord], active_index: usize) -> WidgetView {
        WidgetView {
            status: LoadStatus::Ready,
            status_message: None,
            error: None,
            cards: build_cards(plans, active_index, BillingPeriod::Monthly),
            billing: BillingPeriod::Monthly,
            layout: LayoutMode::Carousel,
            active_index,
            comparison: None,
        }
    }

    #[test]
    fn test_cards_mark_active_plan() {
        let plans = plans();
        let text = cards(&view(&plans, 1), false);

        assert!(text.starts_with("Billing: monthly  Layout: carousel\n"));
        assert!(text.contains("\n  Free  —\n"));
        assert!(text.contains("\n▶ Pro  —\n"));
        assert!(text.contains("    Everything in Free, and more\n"));
        assert!(text.contains("    ✓ sso\n"));
    }

    #[test]
    fn test_cards_show_status_message_instead_of_cards() {
        let mut view = view(&[], 0);
        view.status = LoadStatus::Failed("HTTP 500".to_string());
        view.status_message = Some("No data".to_string());
        view.error = Some("HTTP 500".to_string());

        assert_eq!(
            cards(&view, false),
            "Billing: monthly  Layout: carousel\nNo data\nError: HTTP 500\n"
        );
    }

    #[test]
    fn test_comparison_table_layout() {
        let plans = plans();
        let features: FeatureDictionary =
            [("projects", "Projects"), ("sso", "Single sign-on")].into_iter().collect();
        let table = build_comparison(&plans, &features, 1).unwrap();

        assert_eq!(
            comparison(&table, false),
            "Feature   Free  *Pro\nprojects   ✓     ✓  \nsso        ·     ✓  \n"
        );
    }
}
