//! Client IP extraction from proxy access logs.
//!
//! A qualifying line carries a `405 - POST` status/method pair followed later
//! by a `[Client a.b.c.d]` marker, as written by nginx proxy manager.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::fs_abstraction::{decode_ignoring_invalid, FileSystem};

static CLIENT_405_POST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"405\s*-\s*POST.*\[Client\s+([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)\]")
        .expect("client pattern is a valid regex")
});

/// Return the client IP of a single log line, if the line qualifies.
pub fn match_line(line: &str) -> Option<&str> {
    CLIENT_405_POST
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Collect the distinct client IPs of every qualifying line in `content`.
pub fn extract_client_ips(content: &str) -> HashSet<String> {
    content
        .lines()
        .filter_map(match_line)
        .map(str::to_string)
        .collect()
}

/// Read a log file and extract client IPs from it.
///
/// Bytes that are not valid UTF-8 are dropped rather than rejected, so a
/// corrupt line can never fail the run.
pub fn extract_from_file(fs: &dyn FileSystem, path: &Path) -> Result<HashSet<String>> {
    let bytes = fs
        .read(path)
        .with_context(|| format!("Failed to read log file: {}", path.display()))?;
    let content = decode_ignoring_invalid(&bytes);
    let ips = extract_client_ips(&content);
    debug!("Scanned {} bytes of {}, {} client IPs", bytes.len(), path.display(), ips.len());
    Ok(ips)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ipv4_string_strategy() -> impl Strategy<Value = String> {
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d))
    }

    proptest! {
        /// Every IP written on a qualifying line is extracted, and nothing else
        #[test]
        fn prop_extracts_exactly_qualifying_ips(
            hits in prop::collection::vec(ipv4_string_strategy(), 0..20),
            misses in prop::collection::vec(ipv4_string_strategy(), 0..20),
        ) {
            let mut content = String::new();
            for ip in &hits {
                content.push_str(&format!("- 405 405 - POST https h \"/\" [Client {}] [Length 1]\n", ip));
            }
            for ip in &misses {
                content.push_str(&format!("- 404 404 - POST https h \"/\" [Client {}] [Length 1]\n", ip));
            }

            let expected: HashSet<String> = hits.into_iter().collect();
            prop_assert_eq!(extract_client_ips(&content), expected);
        }

        /// Arbitrary text never panics
        #[test]
        fn prop_arbitrary_content_no_panic(content in ".*") {
            let _ = extract_client_ips(&content);
        }
    }
}
