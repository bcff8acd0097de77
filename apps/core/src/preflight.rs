//! Preflight Check System
//!
//! Reports which services are configured and whether the local directories
//! the server needs are usable. Missing credentials are warnings: the
//! affected endpoints fail on their own when called.

use crate::config::{AppConfig, ChatMode, ServiceCredentials};
use crate::uploads::UploadStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub ready_to_serve: bool,
    pub checks: Vec<CheckResult>,
    pub summary: String,
    pub checked_at: DateTime<Utc>,
}

/// Performs all preflight checks and returns a report
pub fn run_preflight_checks(config: &AppConfig) -> PreflightReport {
    let mut checks = vec![
        check_upload_dir(config),
        check_static_assets(config),
        check_service("language", &config.language),
        check_service("vision", &config.vision),
        check_service("translator", &config.translator.credentials),
        check_direct_line(config),
    ];

    if config.chat.mode == ChatMode::Legacy {
        checks.push(check_luis(config));
    }

    let all_passed = checks.iter().all(|c| c.passed);
    let ready_to_serve = checks
        .iter()
        .filter(|c| is_critical_check(&c.name))
        .all(|c| c.passed);

    let summary = if all_passed {
        "All checks passed. System ready.".to_string()
    } else if ready_to_serve {
        "Some services are not configured; their endpoints will report configuration errors.".to_string()
    } else {
        "Critical checks failed. Uploads cannot be processed.".to_string()
    };

    PreflightReport {
        all_passed,
        ready_to_serve,
        checks,
        summary,
        checked_at: Utc::now(),
    }
}

/// Logs each check; credential values are never printed.
pub fn log_report(report: &PreflightReport) {
    for check in &report.checks {
        if check.passed {
            info!("  ✅ {}: {}", check.name, check.message);
        } else {
            warn!("  ❌ {}: {}", check.name, check.message);
            if let Some(details) = &check.details {
                warn!("      Details: {}", details);
            }
        }
    }
    info!("Summary: {}", report.summary);
}

fn is_critical_check(name: &str) -> bool {
    matches!(name, "upload_dir")
}

// --- Individual Checks ---

fn check_upload_dir(config: &AppConfig) -> CheckResult {
    let store = UploadStore::new(&config.server.upload_dir);
    match store.init() {
        Ok(()) => CheckResult::pass(
            "upload_dir",
            &format!("Upload directory ready at {:?}", store.root()),
        ),
        Err(e) => CheckResult::fail(
            "upload_dir",
            "Failed to create upload directory",
            Some(format!("{:?}: {}", store.root(), e)),
        ),
    }
}

fn check_static_assets(config: &AppConfig) -> CheckResult {
    let index = config.server.templates_dir.join("index.html");
    let mut missing = Vec::new();

    if !index.is_file() {
        missing.push(format!("{:?}", index));
    }
    if !config.server.static_dir.is_dir() {
        missing.push(format!("{:?}", config.server.static_dir));
    }

    if missing.is_empty() {
        CheckResult::pass("static_assets", "Web UI assets found")
    } else {
        CheckResult::fail(
            "static_assets",
            "Web UI assets missing",
            Some(missing.join(", ")),
        )
    }
}

fn check_service(name: &str, credentials: &ServiceCredentials) -> CheckResult {
    let (key_var, endpoint_var) = credentials.variable_names();
    match credentials.resolve() {
        Ok(service) => CheckResult::pass(
            name,
            &format!("Configured ({})", service.endpoint.host_str().unwrap_or("?")),
        ),
        Err(e) => CheckResult::fail(
            name,
            "Not configured",
            Some(format!("{} / {}: {}", key_var, endpoint_var, e.message())),
        ),
    }
}

fn check_direct_line(config: &AppConfig) -> CheckResult {
    if config.direct_line.secret.is_some() {
        CheckResult::pass("direct_line", "Secret configured")
    } else {
        CheckResult::fail(
            "direct_line",
            "Not configured",
            Some("DIRECT_LINE_SECRET is not set".to_string()),
        )
    }
}

fn check_luis(config: &AppConfig) -> CheckResult {
    if config.luis.is_configured() {
        CheckResult::pass("luis", "Configured (not used for classification)")
    } else {
        CheckResult::fail(
            "luis",
            "Not configured",
            Some("LUIS_APP_ID, LUIS_KEY and LUIS_ENDPOINT are optional in legacy mode".to_string()),
        )
    }
}
