//! Error types for post405.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Post405Error {
    #[error("Log file not found: {}", .0.display())]
    LogNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("git {step} failed: {detail}")]
    Publish { step: String, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_not_found_message() {
        let err = Post405Error::LogNotFound(PathBuf::from("/var/log/proxy.log"));
        assert_eq!(err.to_string(), "Log file not found: /var/log/proxy.log");
    }

    #[test]
    fn test_publish_message() {
        let err = Post405Error::Publish {
            step: "push".to_string(),
            detail: "rejected".to_string(),
        };
        assert_eq!(err.to_string(), "git push failed: rejected");
    }
}
