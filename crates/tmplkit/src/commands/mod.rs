//! CLI command implementations

pub mod check;
pub mod render;
pub mod tokens;

use anyhow::Result;
use std::path::Path;
use tmplkit_core::TmplkitError;

/// Read a template file, reporting a missing file as `TEMPLATE_NOT_FOUND`
pub(crate) fn read_template(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(TmplkitError::TemplateNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(std::fs::read_to_string(path)?)
}
