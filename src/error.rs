//! Error types for the fallible edges of the crate: configuration and replay scripts.
//!
//! The interaction core itself never fails; misses and invalid events are
//! reported as `None` or [`crate::machine::Outcome`] values instead.

use std::path::PathBuf;

/// Stable machine-readable code for an error, alongside its display message.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Errors produced while reading [`crate::config::EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The variable is set but does not parse as a number.
    #[error("{var} is not a number: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// The variable parses but is not a positive finite number.
    #[error("{var} must be positive and finite, got {value}")]
    OutOfRange { var: &'static str, value: f64 },

    /// The hit priority is neither `first` nor `topmost`.
    #[error("unknown hit priority: {0:?} (expected 'first' or 'topmost')")]
    UnknownPriority(String),

    /// The variable is set to something that is not valid unicode.
    #[error("{var} is not valid unicode")]
    NotUnicode { var: &'static str },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNumber { .. } => "E_CONFIG_NUMBER",
            Self::OutOfRange { .. } => "E_CONFIG_RANGE",
            Self::UnknownPriority(_) => "E_CONFIG_PRIORITY",
            Self::NotUnicode { .. } => "E_CONFIG_UNICODE",
        }
    }
}

// =============================================================================
// SCRIPT
// =============================================================================

/// Errors produced while loading a replay script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line is not a valid gesture.
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl ErrorCode for ScriptError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "E_SCRIPT_IO",
            Self::Parse { .. } => "E_SCRIPT_PARSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::Interrupted)
    }
}

// =============================================================================
// REPLAY
// =============================================================================

/// Anything that stops the replay binary.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("script: {0}")]
    Script(#[from] ScriptError),
}

impl ErrorCode for ReplayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Script(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Config(e) => e.retryable(),
            Self::Script(e) => e.retryable(),
        }
    }
}
