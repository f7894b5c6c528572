//! CLI command structure using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tmplkit")]
#[command(version, about = "Render {{ }} / {% %} templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to tmplkit.toml (defaults to ./tmplkit.toml when present)
    #[arg(long, global = true, env = "TMPLKIT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template to stdout or a file
    Render {
        /// Template file
        template: PathBuf,

        /// Data file (.toml or .json) merged into the context, repeatable
        #[arg(short, long = "data", value_name = "FILE")]
        data: Vec<PathBuf>,

        /// Bind a single value, repeatable
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not expose builtin callables
        #[arg(long)]
        no_builtins: bool,
    },

    /// Compile templates without rendering them
    Check {
        /// Template files
        #[arg(required = true)]
        templates: Vec<PathBuf>,
    },

    /// Show the fragments a template is split into
    Tokens {
        /// Template file
        template: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
