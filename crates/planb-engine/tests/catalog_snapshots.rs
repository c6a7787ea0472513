use planb_engine::{build_catalog, build_comparison, pick_default_index, price_label};
use planb_types::{BillingPeriod, PlanCatalog};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

// Helper to load a raw payload from fixture JSON
fn load_fixture(fixture_name: &str) -> Value {
    let path = Path::new("tests/fixtures").join(fixture_name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|_| panic!("Failed to parse fixture: {}", path.display()))
}

fn render(catalog: &PlanCatalog) -> String {
    catalog
        .plans
        .iter()
        .map(|plan| {
            format!(
                "{} [{}] <- {}: {}",
                plan.name,
                price_label(plan, BillingPeriod::Monthly),
                plan.inherits.as_deref().unwrap_or("-"),
                plan.features.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_resolved_catalog_snapshot() {
    let catalog = build_catalog(&load_fixture("plans.json"));
    let rendered = render(&catalog);

    insta::assert_snapshot!("resolved_catalog", rendered);
}

#[test]
fn test_fixture_default_and_comparison() {
    let catalog = build_catalog(&load_fixture("plans.json"));

    let index = pick_default_index(
        &catalog.plans,
        catalog.default_plan.as_deref(),
        Some("Enterprise"),
        None,
    );
    assert_eq!(index, 1);

    let table = build_comparison(&catalog.plans, &catalog.features, index).unwrap();
    let features: Vec<&str> = table.rows.iter().map(|r| r.feature.as_str()).collect();
    assert_eq!(features, vec!["projects", "email", "sso", "audit"]);

    let audit = &table.rows[3];
    assert_eq!(audit.description, "Audit log");
    assert_eq!(audit.included, vec![false, false, true, false]);
}

#[test]
fn test_free_to_pro_scenario() {
    let catalog = build_catalog(&json!({
        "plans": [
            {"name": "Free", "features": ["email"]},
            {"name": "Pro", "inherits": "Free", "features": ["sso"]}
        ]
    }));

    assert_eq!(catalog.plans[1].features, vec!["email", "sso"]);
}

#[test]
fn test_empty_payload_builds_empty_catalog() {
    let catalog = build_catalog(&json!({"plans": []}));
    assert!(catalog.is_empty());
    assert_eq!(pick_default_index(&catalog.plans, None, Some("Pro"), Some(2)), 0);
    assert!(build_comparison(&catalog.plans, &catalog.features, 0).is_none());
}
