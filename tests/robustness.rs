//! Robustness tests for edge cases in log and list input.

use std::collections::HashSet;
use std::path::Path;

use post405::extractor::{extract_client_ips, extract_from_file};
use post405::fs_abstraction::{real_fs, FileSystem};
use post405::iplist::{load_existing, parse_list, render};

/// Lines without a newline at the end are still scanned
#[test]
fn test_last_line_without_newline() {
    let ips = extract_client_ips("405 - POST [Client 1.1.1.1]\n405 - POST [Client 2.2.2.2]");
    assert_eq!(ips.len(), 2);
}

/// A very long line does not break extraction
#[test]
fn test_very_long_line() {
    let padding = "x".repeat(1_000_000);
    let line = format!("405 - POST {} [Client 4.3.2.1]", padding);
    let ips = extract_client_ips(&line);
    assert!(ips.contains("4.3.2.1"));
}

/// Full-width digits and other look-alikes never match
#[test]
fn test_unicode_lookalikes_ignored() {
    assert!(extract_client_ips("405 - POST [Client １.２.３.４]").is_empty());
    assert!(extract_client_ips("４０５ - POST [Client 1.2.3.4]").is_empty());
}

/// Many lines with few distinct clients collapse to a small set
#[test]
fn test_large_log_collapses_duplicates() {
    let content: String = (0..50_000u32)
        .map(|i| format!("405 - POST [Client 10.0.{}.{}]\n", (i / 256) % 4, i % 256))
        .collect();
    let ips = extract_client_ips(&content);
    assert_eq!(ips.len(), 1024);
}

/// A list file written by hand with CRLF endings and stray spaces loads cleanly
#[test]
fn test_hand_edited_list() {
    let ips = parse_list("1.1.1.1\r\n  2.2.2.2 \r\n\r\n");
    let expected: HashSet<String> = ["1.1.1.1", "2.2.2.2"].iter().map(|s| s.to_string()).collect();
    assert_eq!(ips, expected);
    assert_eq!(render(&ips), "1.1.1.1\n2.2.2.2\n");
}

/// Reading through the real filesystem tolerates invalid UTF-8
#[test]
fn test_real_files_with_invalid_utf8() {
    let dir = tempfile::TempDir::new().unwrap();
    let log = dir.path().join("access.log");
    let list = dir.path().join("list.txt");
    std::fs::write(&log, b"\x80\x81 405 - POST \xc0 [Client 9.9.9.9]\n").unwrap();
    std::fs::write(&list, b"1.2.3.4\n\xfe\n").unwrap();

    let found = extract_from_file(real_fs(), &log).unwrap();
    assert!(found.contains("9.9.9.9"));

    let existing = load_existing(real_fs(), &list).unwrap();
    assert!(existing.contains("1.2.3.4"));
}

/// A directory given as the list path is an error, not an empty list
#[test]
fn test_list_path_is_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(real_fs().exists(dir.path()));
    assert!(load_existing(real_fs(), dir.path()).is_err());
}

/// Missing list path is the normal first-run state
#[test]
fn test_missing_list_is_empty() {
    let ips = load_existing(real_fs(), Path::new("/nonexistent/post405/list.txt")).unwrap();
    assert!(ips.is_empty());
}
