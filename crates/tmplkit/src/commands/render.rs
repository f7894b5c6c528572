//! Render command - render a template against data files and assignments

use crate::context::AppContext;
use crate::output;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use tmplkit_core::{Template, TmplkitError};

use super::read_template;

/// Arguments of `tmplkit render`
pub struct RenderArgs {
    pub template: PathBuf,
    pub data: Vec<PathBuf>,
    pub set: Vec<String>,
    pub output: Option<PathBuf>,
    pub no_builtins: bool,
}

/// Render a template to stdout or `args.output`
///
/// Nothing is written when compiling or rendering fails.
pub fn run(args: RenderArgs, config: Option<PathBuf>, verbose: bool) -> Result<()> {
    let ctx = AppContext::new(config, verbose)?;

    if ctx.verbose {
        eprintln!("{} Rendering {}", "→".cyan(), args.template.display());
    }

    let source = read_template(&args.template)?;
    let template = Template::compile(&source).map_err(TmplkitError::from)?;
    let context = ctx.render_context(&args.data, &args.set, !args.no_builtins)?;
    let mut rendered = template.render(&context).map_err(TmplkitError::from)?;

    if ctx.config.render.trailing_newline && !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    output::write_rendered(&rendered, args.output.as_deref())?;

    if let Some(path) = &args.output {
        println!(
            "{} Rendered {} -> {}",
            "✓".green().bold(),
            args.template.display(),
            path.display()
        );
    }

    Ok(())
}
