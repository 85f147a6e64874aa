//! Upstream gateway collaborator
//!
//! The gateway that accepts template uploads is an external service; only
//! its logical contract lives here. A successful define returns a bare
//! token string; any non-success status is surfaced verbatim, status code
//! and body, as an operator-facing failure.
//!
//! The on-disk tokenized template contract also lives here: a template file
//! that parses but lacks its token field is a distinct, surfaced violation,
//! never silently defaulted.

mod errors;
mod template;

pub use errors::{GatewayError, GatewayResult, TemplateError, TemplateResult};
pub use template::{tokenize, TokenizedTemplate, TOKEN_FIELD};

/// The gateway's define endpoint.
pub trait DefineGateway {
    /// Uploads a raw template; success yields the bare stream token.
    fn define(&mut self, raw_template: &str) -> GatewayResult<String>;
}
