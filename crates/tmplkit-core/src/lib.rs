// Core modules
pub mod config;
pub mod data;
pub mod error;
pub mod template;

// Re-export commonly used types
pub use error::{Result, TmplkitError};
pub use template::{
    builtins, compile, parse_literal, render, tokenize, Context, Fragment, FragmentKind,
    Function, Kwargs, Map, Template, TemplateError, Value,
};
