//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Endpoint URLs parse and use http(s)
//! - Value ranges (timeouts > 0, known log levels)
//!
//! # Design Decisions
//! - Returns all issues, not just the first
//! - Pure function: AppConfig → Result<(), Vec<ConfigIssue>>

use std::fmt;
use url::Url;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// One problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn check_http_url(field: &str, raw: &str, issues: &mut Vec<ConfigIssue>) {
    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => issues.push(ConfigIssue {
            field: field.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => issues.push(ConfigIssue {
            field: field.to_string(),
            message: format!("invalid URL '{}': {}", raw, e),
        }),
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ConfigIssue>> {
    let mut issues = Vec::new();

    if let Some(url) = &config.node.api_url {
        check_http_url("node.api_url", url, &mut issues);
    }

    if config.node.request_timeout_secs == 0 {
        issues.push(ConfigIssue {
            field: "node.request_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    for (name, api) in &config.apis {
        check_http_url(&format!("apis.{}.host", name), &api.host, &mut issues);
        if api.api_key_header.trim().is_empty() {
            issues.push(ConfigIssue {
                field: format!("apis.{}.api_key_header", name),
                message: "must not be empty".to_string(),
            });
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        issues.push(ConfigIssue {
            field: "observability.log_level".to_string(),
            message: format!("unknown level '{}'", config.observability.log_level),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
