//! MAC address normalization and validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Six 2-hex-digit groups, uniformly separated by ':' or '-'
static MAC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:[0-9A-Fa-f]{2}:){5}|(?:[0-9A-Fa-f]{2}-){5})[0-9A-Fa-f]{2}$")
        .expect("invalid MAC regex")
});

/// Canonical form: trimmed, uppercase hex
pub fn normalize(mac: &str) -> String {
    mac.trim().to_uppercase()
}

/// An empty MAC is treated as "not provided" and is always accepted.
pub fn is_valid(mac: &str) -> bool {
    let mac = mac.trim();
    mac.is_empty() || MAC_PATTERN.is_match(mac)
}
