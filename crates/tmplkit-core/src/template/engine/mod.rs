//! Template engine implementation
//!
//! `tokenize` → `compile` → `render`. Compilation happens once; the
//! resulting [`Template`] is immutable and can be rendered repeatedly, from
//! several threads if needed.

mod compile;
mod context;
mod expr;
mod render;
mod tokenize;
mod tree;
mod value;

use crate::template::error::TemplateError;

use compile::Compiler;
use render::Renderer;

pub use context::{Context, ITEM_NAME, PARENT_PREFIX};
pub use expr::{parse_literal, CallSite, CompareOp, Condition, Expr, Name};
pub use tokenize::{tokenize, Fragment, FragmentKind, Tokenizer};
pub use tree::{BranchCache, Branches, Node, NodeId, NodeKind, Tree};
pub use value::{Function, Kwargs, Map, Value};

/// A compiled template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    tree: Tree,
}

impl Template {
    /// Compile template text into a tree
    ///
    /// # Errors
    ///
    /// Returns a `Syntax`, `Structural` or `Expression` error naming the
    /// offending fragment.
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let tree = Compiler::new().compile(tokenize(source))?;
        Ok(Self { tree })
    }

    /// Render the template against a context
    ///
    /// Rendering never modifies the template. On error no partial output is
    /// returned.
    pub fn render(&self, context: &Context<'_>) -> Result<String, TemplateError> {
        let output = Renderer::new(&self.tree).render(context)?;
        log::debug!("rendered {} bytes", output.len());
        Ok(output)
    }

    /// The compiled tree
    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

impl std::str::FromStr for Template {
    type Err = TemplateError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Template::compile(source)
    }
}

/// Convenience function to compile a template
pub fn compile(source: &str) -> Result<Template, TemplateError> {
    Template::compile(source)
}

/// Convenience function to compile and render a template in one go
pub fn render(source: &str, context: &Context<'_>) -> Result<String, TemplateError> {
    compile(source)?.render(context)
}

#[cfg(test)]
mod tests;
