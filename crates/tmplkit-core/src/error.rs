use std::path::PathBuf;
use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum TmplkitError {
    // Template errors
    #[error("TEMPLATE_ERROR: {0}")]
    Template(#[from] TemplateError),

    #[error("TEMPLATE_NOT_FOUND: template '{path}' does not exist")]
    TemplateNotFound { path: PathBuf },

    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to parse '{path}': {reason}")]
    ConfigParseError { path: PathBuf, reason: String },

    // Data errors
    #[error("DATA_UNSUPPORTED_FORMAT: '{path}' is not a .toml or .json file")]
    DataUnsupportedFormat { path: PathBuf },

    #[error("DATA_PARSE_ERROR: failed to parse '{path}': {reason}")]
    DataParseError { path: PathBuf, reason: String },

    #[error("DATA_NOT_A_TABLE: top level of '{path}' must be a table or object")]
    DataNotATable { path: PathBuf },

    #[error("DATA_INVALID_ASSIGNMENT: expected KEY=VALUE, got '{0}'")]
    DataInvalidAssignment(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TmplkitError>;
