//! `tmplkit.toml` configuration

mod model;

pub use model::{Config, ContextConfig, RenderConfig, CONFIG_FILE_NAME};
