//! Settings model and precedence rules.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use blogdash_core::ServiceUrl;
use blogdash_view::config::DEFAULT_REQUEST_TIMEOUT;

use super::DEFAULT_SERVICE;

/// Stored settings. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env,
    Settings,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Flag => "flag",
            Source::Env => "environment",
            Source::Settings => "settings file",
            Source::Default => "default",
        })
    }
}

/// Connection settings after precedence has been applied.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub service: ServiceUrl,
    pub service_source: Source,
    pub timeout: Duration,
    pub timeout_source: Source,
}

fn pick<T>(flag: Option<T>, env: Option<T>, stored: Option<T>) -> Option<(T, Source)> {
    flag.map(|v| (v, Source::Flag))
        .or_else(|| env.map(|v| (v, Source::Env)))
        .or_else(|| stored.map(|v| (v, Source::Settings)))
}

/// Apply flag, then environment, then stored settings, then defaults.
///
/// Environment values are passed in raw so callers decide where they come
/// from.
pub fn resolve(
    flag_service: Option<&str>,
    flag_timeout: Option<u64>,
    env_service: Option<String>,
    env_timeout: Option<String>,
    stored: &Settings,
) -> Result<Resolved> {
    let env_timeout = env_timeout
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid {} value '{raw}'", super::TIMEOUT_ENV))
        })
        .transpose()?;

    let (service, service_source) = pick(
        flag_service.map(str::to_string),
        env_service.filter(|s| !s.trim().is_empty()),
        stored.service.clone(),
    )
    .unwrap_or_else(|| (DEFAULT_SERVICE.to_string(), Source::Default));

    let service = ServiceUrl::new(&service)
        .with_context(|| format!("Invalid service URL from {service_source}"))?;

    let (timeout, timeout_source) = match pick(flag_timeout, env_timeout, stored.timeout_secs) {
        Some((0, source)) => anyhow::bail!("Timeout from {source} must be at least 1 second"),
        Some((secs, source)) => (Duration::from_secs(secs), source),
        None => (DEFAULT_REQUEST_TIMEOUT, Source::Default),
    };

    Ok(Resolved {
        service,
        service_source,
        timeout,
        timeout_source,
    })
}
