//! Template module - compile-then-render expression templates
//!
//! Templates are plain text with two kinds of tags. A template is compiled
//! once into a tree and can then be rendered any number of times against
//! different contexts.
//!
//! ## Syntax
//!
//! - Variables: `{{name}}`, `{{ nested.key }}`, `{{ ..outer }}`
//! - Loops: `{% each items %}{{it}}{% end %}` (`it` is the current item,
//!   `..name` reaches the enclosing context)
//! - Conditionals: `{% if count > 3 %}many{% else %}few{% end %}`
//! - Calls: `{% call log 'here' verbosity='debug' %}`
//!
//! Literals understood in expressions are integers, floats, quoted strings,
//! `[...]` lists, `true`/`false` and `none`. Anything else is a name.

pub mod builtins;
pub mod engine;
pub mod error;

pub use engine::{
    compile, parse_literal, render, tokenize, Context, Fragment, FragmentKind, Function, Kwargs,
    Map, Template, Tokenizer, Value,
};
pub use error::TemplateError;
