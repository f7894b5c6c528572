//! Render context assembly for CLI commands

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tmplkit_core::config::{CONFIG_FILE_NAME, Config};
use tmplkit_core::data;
use tmplkit_core::template::builtins;
use tmplkit_core::Context;

/// Loaded configuration plus command-line flags shared by commands
pub struct AppContext {
    pub config: Config,
    pub verbose: bool,
}

impl AppContext {
    /// Load the configuration
    ///
    /// An explicit `config_path` must exist. Without one, `tmplkit.toml` in
    /// the current directory is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn new(config_path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::from_file(&path)?,
            None => Config::load_or_default(&env::current_dir()?.join(CONFIG_FILE_NAME))?,
        };
        Ok(Self { config, verbose })
    }

    /// Build the render context
    ///
    /// Later sources override earlier ones: config data files, config
    /// globals, `data_files`, then `assignments`. Builtins are added last
    /// and never replace a bound name.
    ///
    /// # Errors
    ///
    /// Returns an error if a data file or assignment is invalid
    pub fn render_context(
        &self,
        data_files: &[PathBuf],
        assignments: &[String],
        builtins_enabled: bool,
    ) -> Result<Context<'static>> {
        let mut context = Context::new();

        for path in self.config.context.files.iter().chain(data_files) {
            log::debug!("loading data from {}", path.display());
            context.extend(data::load_file(path)?);
        }
        context.extend(data::from_table(self.config.context.globals.clone()));

        for assignment in assignments {
            let (key, value) = data::parse_assignment(assignment)?;
            context.insert(key, value);
        }

        if builtins_enabled && self.config.render.builtins {
            builtins::install(&mut context);
        }
        log::debug!("render context has {} top-level names", context.vars().len());
        Ok(context)
    }
}
