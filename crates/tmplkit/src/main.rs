mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Render {
            template,
            data,
            set,
            output,
            no_builtins,
        } => commands::render::run(
            commands::render::RenderArgs {
                template,
                data,
                set,
                output,
                no_builtins,
            },
            cli.config,
            cli.verbose,
        ),
        Commands::Check { templates } => commands::check::run(templates, cli.verbose),
        Commands::Tokens { template, json } => commands::tokens::run(template, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
