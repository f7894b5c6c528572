//! Check command - compile templates and report errors without rendering

use anyhow::{Result, bail};
use colored::Colorize;
use std::path::PathBuf;
use tmplkit_core::{Template, TmplkitError};

use super::read_template;

/// Compile every template, reporting each one
///
/// # Errors
///
/// Returns an error if at least one template fails to compile
pub fn run(templates: Vec<PathBuf>, verbose: bool) -> Result<()> {
    let mut failed = 0;

    for path in &templates {
        let result = read_template(path).and_then(|source| {
            Template::compile(&source).map_err(|e| anyhow::Error::from(TmplkitError::from(e)))
        });
        match result {
            Ok(template) => {
                println!("{} {}", "✓".green().bold(), path.display());
                if verbose {
                    print!("{}", template.tree().outline());
                }
            }
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "✗".red().bold(), path.display(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} template(s) failed to compile", failed, templates.len());
    }

    println!(
        "\n{} {} template(s) OK",
        "✓".green().bold(),
        templates.len()
    );
    Ok(())
}
