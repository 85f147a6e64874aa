//! Gateway and template error types
//!
//! The parse/token-missing split is deliberate: operators need to tell
//! "bad file" apart from "file missing a required field".

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for gateway calls
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Result type for template file handling
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Failures of the define endpoint
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Gateway unreachable
    #[error("gateway unreachable: {detail}")]
    Connectivity {
        /// Transport-level failure detail
        detail: String,
    },

    /// Non-success status, surfaced verbatim
    #[error("gateway returned {status}: {body}")]
    Server {
        /// HTTP status code as returned
        status: u16,
        /// Response body as returned
        body: String,
    },
}

/// Failures of tokenized template handling
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The file could not be read
    #[error("template file unreadable: {0}")]
    Io(#[from] io::Error),

    /// The document is malformed; no partial effect is committed
    #[error("template is not valid JSON: {reason}")]
    Parse {
        /// Parser failure detail
        reason: String,
    },

    /// The document parsed but carries no token field
    #[error("template at {path:?} has no stream token field")]
    TokenMissing {
        /// File the template came from, when known
        path: PathBuf,
    },
}
