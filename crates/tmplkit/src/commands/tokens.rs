//! Tokens command - show how a template is split into fragments

use crate::output::{print_json, print_text};
use anyhow::Result;
use std::path::PathBuf;
use tmplkit_core::{Fragment, FragmentKind, tokenize};

use super::read_template;

/// Print the fragments of a template, one per line or as a JSON array
pub fn run(template: PathBuf, json: bool) -> Result<()> {
    let source = read_template(&template)?;
    let fragments = tokenize(&source).collect::<Result<Vec<Fragment<'_>>, _>>()?;

    if json {
        print_json(&serde_json::to_string_pretty(&fragments)?)?;
        return Ok(());
    }

    for fragment in &fragments {
        print_text(&format!(
            "{:>4}:{:<6} {:<11} {:?}",
            fragment.line,
            fragment.start,
            kind_label(fragment),
            fragment.raw
        ))?;
    }
    Ok(())
}

fn kind_label(fragment: &Fragment<'_>) -> &'static str {
    match fragment.kind {
        FragmentKind::Text => "text",
        FragmentKind::Variable => "variable",
        FragmentKind::OpenBlock => "open_block",
        FragmentKind::CloseBlock => "close_block",
    }
}
