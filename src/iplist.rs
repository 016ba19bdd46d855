//! Persisted IP list: loading, numeric ordering and atomic saving.
//!
//! The list is plain text, one IPv4 address per line. Any order is accepted on
//! read; on write the entries are sorted by their octets as integers, so
//! `192.168.1.9` comes before `192.168.1.10`.

use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::fs_abstraction::{decode_ignoring_invalid, FileSystem};

/// Load the previously persisted list. A missing file is an empty list.
pub fn load_existing(fs: &dyn FileSystem, path: &Path) -> Result<HashSet<String>> {
    let bytes = match fs.read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet, starting empty", path.display());
            return Ok(HashSet::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read IP list: {}", path.display()))
        }
    };

    Ok(parse_list(&decode_ignoring_invalid(&bytes)))
}

/// Parse list contents: trim every line, drop blank ones.
pub fn parse_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Numeric sort key of a dotted-quad, or `None` if any octet is not a number.
fn octets(ip: &str) -> Option<[u32; 4]> {
    let mut key = [0u32; 4];
    let mut parts = ip.split('.');
    for slot in key.iter_mut() {
        *slot = parts.next()?.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(key)
}

/// Compare two entries by numeric octets.
///
/// Entries that are not dotted-quads (only possible in a hand-edited list)
/// sort after every numeric one, in lexical order among themselves.
pub fn compare_ips(a: &str, b: &str) -> Ordering {
    match (octets(a), octets(b)) {
        (Some(ka), Some(kb)) => ka.cmp(&kb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Return the entries of `ips` in ascending numeric order.
pub fn sort_numeric(ips: &HashSet<String>) -> Vec<&str> {
    let mut sorted: Vec<&str> = ips.iter().map(String::as_str).collect();
    sorted.sort_by(|a, b| compare_ips(a, b));
    sorted
}

/// Render the file body: one IP per line, LF-terminated.
pub fn render(ips: &HashSet<String>) -> String {
    let sorted = sort_numeric(ips);
    let mut out = String::with_capacity(sorted.iter().map(|ip| ip.len() + 1).sum());
    for ip in sorted {
        out.push_str(ip);
        out.push('\n');
    }
    out
}

/// Write the list to `path`, replacing any previous version atomically.
pub fn save(fs: &dyn FileSystem, path: &Path, ips: &HashSet<String>) -> Result<()> {
    let body = render(ips);
    fs.write_atomic(path, body.as_bytes())
        .with_context(|| format!("Failed to write IP list: {}", path.display()))?;
    debug!("Wrote {} entries to {}", ips.len(), path.display());
    Ok(())
}
