//! Administrative commands backing the `warden-cli` binary.

use anyhow::{Context, anyhow};
use chrono::Duration;
use warden_auth::{ClaimValue, Claims, SUBJECT_CLAIM, TokenCore};
use warden_core::{BcryptHasher, PasswordHasher};

/// Parses a `key=value` claim argument.
///
/// The value is typed by its text: `true`/`false` become booleans, whole
/// numbers integers, other numbers floats, and anything else a string.
pub fn parse_claim(raw: &str) -> Result<(String, ClaimValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err("claim name must not be empty".to_string());
    }

    let value = if let Ok(b) = value.parse::<bool>() {
        ClaimValue::Bool(b)
    } else if let Ok(i) = value.parse::<i64>() {
        ClaimValue::Integer(i)
    } else if let Some(f) = value.parse::<f64>().ok().filter(|f| f.is_finite()) {
        ClaimValue::Float(f)
    } else {
        ClaimValue::String(value.to_string())
    };

    Ok((key.to_string(), value))
}

/// Issues a credential for `subject` with the extra claims given.
///
/// An explicit `sub` among `extra` is overridden by `subject`, and `exp` is
/// always stamped by the core.
pub fn issue_token(
    core: &TokenCore,
    subject: &str,
    ttl_minutes: Option<i64>,
    extra: Vec<(String, ClaimValue)>,
) -> anyhow::Result<String> {
    let mut claims: Claims = extra.into_iter().collect();
    claims.insert(SUBJECT_CLAIM, subject);

    let ttl = ttl_minutes
        .map(|minutes| {
            Duration::try_minutes(minutes)
                .ok_or_else(|| anyhow!("TTL of {minutes} minutes is out of range"))
        })
        .transpose()?;

    core.issue(&claims, ttl).context("Failed to sign credential")
}

/// Verifies `credential` and renders its claims as pretty JSON.
pub fn verify_token(core: &TokenCore, credential: &str) -> anyhow::Result<String> {
    let claims = core.verify(credential.trim())?;
    serde_json::to_string_pretty(&claims).context("Failed to render claims")
}

pub fn hash_password(hasher: &BcryptHasher, password: &str) -> anyhow::Result<String> {
    hasher.hash(password).map_err(|e| anyhow!(e.message()))
}
