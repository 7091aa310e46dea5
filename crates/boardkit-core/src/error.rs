//! Error handling for BoardKit.
//!
//! The drafting core signals expected "no match" and no-op conditions with
//! `Option`/sentinel returns rather than errors. The types here cover the
//! genuinely fallible channels: measurement text that cannot be parsed,
//! face tags that fail to deserialize, and design files from an
//! unsupported version.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Errors raised by the drafting core's fallible channels.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    /// Measurement text did not match any recognized form
    /// (feet/inches/fraction or plain decimal).
    #[error("Unrecognized measurement: {input}")]
    UnrecognizedMeasurement {
        /// The text that failed to parse.
        input: String,
    },

    /// A face identifier string was not `FRONT`, `BACK`, or `EDGE_<i>`.
    #[error("Unknown face identifier: {name}")]
    UnknownFace {
        /// The unrecognized identifier.
        name: String,
    },

    /// A persisted design file declared a version this build cannot read.
    #[error("Unsupported design file version: {version}")]
    UnsupportedVersion {
        /// The version string from the file header.
        version: String,
    },
}

/// Convenience result alias for BoardKit operations.
pub type Result<T> = std::result::Result<T, DesignError>;
