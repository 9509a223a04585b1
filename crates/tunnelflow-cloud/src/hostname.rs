//! Hostname resolution
//!
//! Splits a fully-qualified hostname into the tunnel name (leftmost label)
//! and the root domain the zone is looked up by. No network access.

use crate::error::{CloudError, Result};

/// Minimum number of labels: `<tunnel>.<domain>.<tld>`
const MIN_LABELS: usize = 3;

/// Split `hostname` into `(tunnel_name, root_domain)`
///
/// `app.sub.example.com` resolves to `("app", "sub.example.com")`.
pub fn resolve(hostname: &str) -> Result<(String, String)> {
    let normalized = hostname.trim().trim_end_matches('.').to_ascii_lowercase();
    let labels: Vec<&str> = normalized.split('.').collect();

    if labels.len() < MIN_LABELS {
        return Err(CloudError::Validation(format!(
            "hostname '{}' must have at least {} labels (e.g. app.example.com)",
            hostname, MIN_LABELS
        )));
    }

    if let Some(label) = labels.iter().find(|l| !is_valid_label(l)) {
        return Err(CloudError::Validation(format!(
            "hostname '{}' contains invalid label '{}'",
            hostname, label
        )));
    }

    Ok((labels[0].to_string(), labels[1..].join(".")))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
