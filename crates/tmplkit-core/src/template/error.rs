//! Template error types

use thiserror::Error;

/// Template compile and render errors
///
/// Every variant carries the offending fragment, name or expression so the
/// message can be shown to the template author as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Malformed delimiters or malformed block arguments
    #[error("Syntax error at line {line}: {message} in '{fragment}'")]
    Syntax {
        /// Error message
        message: String,
        /// Raw text of the offending fragment
        fragment: String,
        /// Line number where the fragment starts
        line: usize,
    },

    /// Block tags that do not nest correctly
    #[error("Structural error at line {line}: {message} in '{fragment}'")]
    Structural {
        /// Error message
        message: String,
        /// Raw text of the offending fragment
        fragment: String,
        /// Line number where the fragment starts
        line: usize,
    },

    /// Name not found in the render context
    #[error("Could not resolve '{name}' in the template context")]
    Context {
        /// The full expression that failed, not just the failing segment
        name: String,
    },

    /// Expression that cannot be evaluated
    #[error("Expression error: {message} in '{expr}'")]
    Expression {
        /// Error message
        message: String,
        /// The expression being evaluated
        expr: String,
    },
}

impl TemplateError {
    pub(crate) fn syntax(message: impl Into<String>, fragment: &str, line: usize) -> Self {
        TemplateError::Syntax {
            message: message.into(),
            fragment: fragment.to_string(),
            line,
        }
    }

    pub(crate) fn structural(message: impl Into<String>, fragment: &str, line: usize) -> Self {
        TemplateError::Structural {
            message: message.into(),
            fragment: fragment.to_string(),
            line,
        }
    }

    pub(crate) fn context(name: &str) -> Self {
        TemplateError::Context {
            name: name.to_string(),
        }
    }

    pub(crate) fn expression(message: impl Into<String>, expr: &str) -> Self {
        TemplateError::Expression {
            message: message.into(),
            expr: expr.to_string(),
        }
    }
}
