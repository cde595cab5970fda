//! Miette-based diagnostics for configuration files.
//!
//! A TOML syntax error is rendered with the file content and a label on
//! the offending span.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(biovision::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic from a TOML parse error over `src`.
    #[must_use]
    pub fn from_toml(err: &toml::de::Error, src: &str) -> Self {
        let (offset, len) = err
            .span()
            .map_or((0, 0), |span| (span.start, span.end.saturating_sub(span.start)));
        Self::new(err.message(), src, offset, len)
            .with_help("check the TOML syntax; every section is optional")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_error_points_at_span() {
        let src = "[gemini\ntimeout_secs = 30\n";
        let err = toml::from_str::<toml::Value>(src).unwrap_err();
        let diag = ConfigDiagnostic::from_toml(&err, src);
        assert!(!diag.message.is_empty());
        assert!(diag.help.is_some());
        assert_eq!(diag.src, src);
        assert!(diag.span.offset() < src.len());
    }
}
