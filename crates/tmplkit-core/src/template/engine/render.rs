//! Renderer: walks a compiled [`Tree`] against a [`Context`]

use crate::template::error::TemplateError;

use super::context::Context;
use super::expr::{CallSite, Condition, Expr};
use super::tree::{NodeId, NodeKind, Tree};
use super::value::{Kwargs, Value};

/// Renders one tree; holds no state besides the tree reference
pub(crate) struct Renderer<'t> {
    tree: &'t Tree,
}

impl<'t> Renderer<'t> {
    pub(crate) fn new(tree: &'t Tree) -> Self {
        Self { tree }
    }

    pub(crate) fn render(&self, context: &Context<'_>) -> Result<String, TemplateError> {
        let mut output = String::new();
        self.render_children(&self.tree.root().children, context, &mut output)?;
        Ok(output)
    }

    fn render_children(
        &self,
        children: &[NodeId],
        context: &Context<'_>,
        output: &mut String,
    ) -> Result<(), TemplateError> {
        for child in children {
            self.render_node(*child, context, output)?;
        }
        Ok(())
    }

    fn render_node(
        &self,
        id: NodeId,
        context: &Context<'_>,
        output: &mut String,
    ) -> Result<(), TemplateError> {
        let node = self.tree.node(id);
        match &node.kind {
            NodeKind::Root => self.render_children(&node.children, context, output),
            NodeKind::Text(text) => {
                output.push_str(text);
                Ok(())
            }
            NodeKind::Variable(expr) => {
                let value = eval(expr, context)?;
                output.push_str(&value.to_string());
                Ok(())
            }
            NodeKind::Each { source } => {
                let items = iterate(eval(source, context)?, source)?;
                for item in items {
                    let scope = context.child(item);
                    self.render_children(&node.children, &scope, output)?;
                }
                Ok(())
            }
            NodeKind::If {
                condition,
                source,
                branches,
            } => {
                let branches = self.tree.branches(id, branches);
                let group = if test(condition, source, context)? {
                    branches.then_branch(&node.children)
                } else {
                    branches.else_branch(&node.children)
                };
                self.render_children(group, context, output)
            }
            NodeKind::Call(call) => {
                let value = invoke(call, context)?;
                output.push_str(&value.to_string());
                Ok(())
            }
            // Split point only, never reached through a branch
            NodeKind::Else => Ok(()),
        }
    }
}

/// Evaluate an expression: literals as written, names through the context
fn eval<'a>(expr: &'a Expr, context: &'a Context<'_>) -> Result<&'a Value, TemplateError> {
    match expr {
        Expr::Literal(value) => Ok(value),
        Expr::Name(name) => context.resolve(name),
    }
}

/// Elements an `each` block iterates over: list items or sorted map keys
fn iterate(value: &Value, source: &Expr) -> Result<Vec<Value>, TemplateError> {
    match value {
        Value::List(items) => Ok(items.clone()),
        Value::Map(map) => Ok(map.keys().cloned().map(Value::String).collect()),
        other => Err(TemplateError::expression(
            format!("cannot iterate over {}", other.type_name()),
            &expr_text(source),
        )),
    }
}

fn test(condition: &Condition, source: &str, context: &Context<'_>) -> Result<bool, TemplateError> {
    match condition {
        Condition::Truthy(expr) => Ok(eval(expr, context)?.is_truthy()),
        Condition::Compare { lhs, op, rhs } => {
            let lhs = eval(lhs, context)?;
            let rhs = eval(rhs, context)?;
            op.apply(lhs, rhs, source)
        }
    }
}

fn invoke(call: &CallSite, context: &Context<'_>) -> Result<Value, TemplateError> {
    let name = call.target.as_str();
    let function = match context.resolve(&call.target)? {
        Value::Function(function) => function,
        other => {
            return Err(TemplateError::expression(
                format!("{} is not callable", other.type_name()),
                name,
            ))
        }
    };

    let args = call
        .args
        .iter()
        .map(|arg| eval(arg, context).cloned())
        .collect::<Result<Vec<_>, _>>()?;
    let kwargs = call
        .kwargs
        .iter()
        .map(|(key, arg)| eval(arg, context).map(|value| (key.clone(), value.clone())))
        .collect::<Result<Kwargs, _>>()?;

    log::trace!("call {} with {} args, {} kwargs", name, args.len(), kwargs.len());
    function
        .call(&args, &kwargs)
        .map_err(|message| TemplateError::expression(format!("call failed: {}", message), name))
}

fn expr_text(expr: &Expr) -> String {
    match expr {
        Expr::Literal(value) => value.to_string(),
        Expr::Name(name) => name.to_string(),
    }
}
