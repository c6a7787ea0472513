//! Fixtures for sample payloads.
//!
//! Provides utilities to:
//! - Build the reference four-plan payload used across tests
//! - Build minimal payloads from plan names
//! - Write payloads to disk for file-endpoint tests

use anyhow::Result;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// Four plans with two levels of inheritance, a payload default and a
/// feature dictionary.
///
/// Resolved features:
/// - Free: projects, email
/// - Basic: projects, email, export
/// - Pro: projects, email, export, sso
/// - Enterprise: projects, email, export, sso, audit
pub fn sample_payload() -> Value {
    json!({
        "plans": [
            {
                "name": "Free",
                "monthly_price": 0,
                "yearly_price": 0,
                "description": "For side projects",
                "features": ["projects", "email"]
            },
            {
                "name": "Basic",
                "monthly_price": 5,
                "yearly_price": 50,
                "inherits": "Free",
                "features": ["export"]
            },
            {
                "name": "Pro",
                "monthly_price": 12,
                "yearly_price": 120,
                "inherits": "Basic",
                "description": "For growing teams",
                "features": ["sso"],
                "action": {"name": "Start trial", "url": "https://example.com/signup?plan=pro"}
            },
            {
                "name": "Enterprise",
                "inherits": "Pro",
                "features": ["audit"]
            }
        ],
        "features": {
            "projects": "Unlimited projects",
            "email": "Email support",
            "export": "CSV export",
            "sso": "Single sign-on",
            "audit": "Audit log"
        },
        "default_plan": "Pro"
    })
}

/// Payload with one featureless plan per name and no default.
pub fn payload_with_plans(names: &[&str]) -> Value {
    let plans: Vec<Value> = names.iter().map(|name| json!({ "name": name })).collect();
    json!({ "plans": plans })
}

/// Write `payload` as `<dir>/<file_name>` and return the path.
pub fn write_payload(dir: &Path, file_name: &str, payload: &Value) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, serde_json::to_string_pretty(payload)?)?;
    Ok(path)
}
