//! Tokenized template files
//!
//! After a successful define, the client writes the template back to disk
//! with the returned token stamped into it. Reading one back requires the
//! token field to be present; its absence after a clean parse is a contract
//! violation in its own right.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;

use super::errors::{TemplateError, TemplateResult};

/// Top-level key holding the stream token in a tokenized template.
pub const TOKEN_FIELD: &str = "stream_token";

/// A parsed template file that carries its token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedTemplate {
    /// Token stamped into the template
    pub token: String,
    /// The full template document, token field included
    pub document: Value,
}

impl TokenizedTemplate {
    /// Reads and parses a tokenized template file.
    pub fn from_path(path: &Path) -> TemplateResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw, path.to_path_buf())
    }

    fn parse(raw: &str, origin: PathBuf) -> TemplateResult<Self> {
        let document: Value = serde_json::from_str(raw).map_err(|e| TemplateError::Parse {
            reason: e.to_string(),
        })?;

        let token = document
            .get(TOKEN_FIELD)
            .and_then(Value::as_str)
            .ok_or(TemplateError::TokenMissing { path: origin })?
            .to_string();

        Ok(Self { token, document })
    }
}

impl FromStr for TokenizedTemplate {
    type Err = TemplateError;

    /// Parses a tokenized template from an in-memory string.
    fn from_str(raw: &str) -> TemplateResult<Self> {
        Self::parse(raw, PathBuf::from("<inline>"))
    }
}

/// Stamps a token into a raw template, returning the serialized result.
///
/// The raw template must be a JSON object; an existing token field is
/// overwritten with the new value.
pub fn tokenize(raw: &str, token: &str) -> TemplateResult<String> {
    let mut document: Value = serde_json::from_str(raw).map_err(|e| TemplateError::Parse {
        reason: e.to_string(),
    })?;

    let obj = document.as_object_mut().ok_or(TemplateError::Parse {
        reason: "template root must be a JSON object".to_string(),
    })?;
    obj.insert(TOKEN_FIELD.to_string(), Value::String(token.to_string()));

    serde_json::to_string_pretty(&document).map_err(|e| TemplateError::Parse {
        reason: e.to_string(),
    })
}
