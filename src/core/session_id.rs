//! # Session Identity
//!
//! One opaque token per mount. It correlates every request from this run
//! with a single conversation on the server and is never persisted.
//!
//! Generation prefers OS randomness (formatted as a UUID v4). If the OS
//! source is unavailable, a pseudo-random base-36 token is built from the
//! clock, the process id and a process-wide counter, plus the current time.
//! The fallback never touches OS entropy.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};

/// Opaque per-mount session identifier. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh identifier for a new mount.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        match getrandom::fill(&mut bytes) {
            Ok(()) => {
                let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
                debug!("Generated session id from OS randomness");
                Self(id.to_string())
            }
            Err(e) => {
                warn!("OS randomness unavailable ({e}), using fallback session id");
                Self(fallback_token())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bumped on every fallback so two calls in the same tick still differ.
static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Pseudo-random part + timestamp part, both base 36.
fn fallback_token() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);

    let seed = (now.as_nanos() as u64)
        ^ (u64::from(std::process::id()) << 32)
        ^ count.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let random_part = mix64(seed);

    format!(
        "{}{}",
        to_base36(random_part as u128),
        to_base36(now.as_millis())
    )
}

/// SplitMix64 finalizer: spreads nearby seeds across the whole range.
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    // Only ASCII digits were pushed.
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_differ_between_mounts() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_id_is_uuid_shaped() {
        let id = SessionId::generate();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn fallback_tokens_are_non_empty_and_distinct() {
        let a = fallback_token();
        let b = fallback_token();
        assert!(!a.is_empty());
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn mixing_spreads_adjacent_seeds() {
        let a = mix64(1);
        let b = mix64(2);
        assert_ne!(a, b);
        // Adjacent inputs should differ in many bits, not just the low one.
        assert!((a ^ b).count_ones() > 8);
    }

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
    }

    #[test]
    fn display_matches_inner_string() {
        let id = SessionId::generate();
        assert_eq!(id.to_string(), id.as_str());
    }
}
