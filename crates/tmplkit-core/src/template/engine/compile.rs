//! Tree builder: turns the fragment sequence into a [`Tree`]
//!
//! The builder keeps a stack of open scopes. The top of the stack receives
//! every new node; `if` and `each` push a scope, `{% end %}` pops one.

use crate::template::error::TemplateError;

use super::expr::{split_args, split_kwarg, CallSite, CompareOp, Condition, Expr};
use super::tokenize::{Fragment, FragmentKind, Tokenizer};
use super::tree::{BranchCache, NodeId, NodeKind, Tree};

/// What the innermost open scope is currently collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScopeState {
    AtRoot,
    InIfThen,
    InIfElse,
    InEach,
}

/// An entry of the scope stack
#[derive(Debug, Clone)]
struct Scope {
    node: NodeId,
    state: ScopeState,
    /// Raw text of the opening fragment, for unterminated-block errors
    opened_by: String,
    line: usize,
}

/// Compiler state for one pass over a template
pub(crate) struct Compiler {
    tree: Tree,
    scopes: Vec<Scope>,
}

impl Compiler {
    pub(crate) fn new() -> Self {
        Self {
            tree: Tree::new(),
            scopes: vec![Scope {
                node: Tree::ROOT,
                state: ScopeState::AtRoot,
                opened_by: String::new(),
                line: 1,
            }],
        }
    }

    /// Consume every fragment and return the finished tree
    pub(crate) fn compile(mut self, fragments: Tokenizer<'_>) -> Result<Tree, TemplateError> {
        for fragment in fragments {
            self.process(&fragment?)?;
        }
        self.finish()
    }

    fn current(&self) -> &Scope {
        // The root scope is never popped
        &self.scopes[self.scopes.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    fn process(&mut self, fragment: &Fragment<'_>) -> Result<(), TemplateError> {
        match fragment.kind {
            FragmentKind::Text => {
                self.append(NodeKind::Text(fragment.raw.to_string()), fragment);
                Ok(())
            }
            FragmentKind::Variable => {
                let expr = fragment.inner();
                if expr.is_empty() {
                    return Err(TemplateError::syntax(
                        "empty variable tag",
                        fragment.raw,
                        fragment.line,
                    ));
                }
                self.append(NodeKind::Variable(Expr::parse(expr)?), fragment);
                Ok(())
            }
            FragmentKind::CloseBlock => self.exit_scope(fragment),
            FragmentKind::OpenBlock => self.open_block(fragment),
        }
    }

    fn open_block(&mut self, fragment: &Fragment<'_>) -> Result<(), TemplateError> {
        let command = fragment
            .command()
            .ok_or_else(|| TemplateError::syntax("empty block tag", fragment.raw, fragment.line))?;

        match command {
            "if" => {
                let source = fragment.arguments();
                let condition = parse_condition(source, fragment)?;
                let kind = NodeKind::If {
                    condition,
                    source: source.to_string(),
                    branches: BranchCache::default(),
                };
                self.enter_scope(kind, ScopeState::InIfThen, fragment);
                Ok(())
            }
            "each" => {
                let source = fragment.arguments();
                if source.is_empty() {
                    return Err(TemplateError::syntax(
                        "each expects a list or map to iterate",
                        fragment.raw,
                        fragment.line,
                    ));
                }
                let kind = NodeKind::Each {
                    source: Expr::parse(source)?,
                };
                self.enter_scope(kind, ScopeState::InEach, fragment);
                Ok(())
            }
            "call" => {
                let call = parse_call(fragment.arguments(), fragment)?;
                self.append(NodeKind::Call(call), fragment);
                Ok(())
            }
            "else" => self.mark_else(fragment),
            other => Err(TemplateError::structural(
                format!("unknown block command '{}'", other),
                fragment.raw,
                fragment.line,
            )),
        }
    }

    fn append(&mut self, kind: NodeKind, fragment: &Fragment<'_>) -> NodeId {
        let parent = self.current().node;
        self.tree.push(parent, kind, fragment.line)
    }

    /// Append a scope-creating node and make it the insertion target
    fn enter_scope(&mut self, kind: NodeKind, state: ScopeState, fragment: &Fragment<'_>) {
        log::trace!("enter {} scope at line {}", kind.label(), fragment.line);
        let node = self.append(kind, fragment);
        self.scopes.push(Scope {
            node,
            state,
            opened_by: fragment.raw.to_string(),
            line: fragment.line,
        });
    }

    fn exit_scope(&mut self, fragment: &Fragment<'_>) -> Result<(), TemplateError> {
        if !fragment.arguments().is_empty() {
            return Err(TemplateError::syntax(
                "end takes no arguments",
                fragment.raw,
                fragment.line,
            ));
        }
        if self.scopes.len() == 1 {
            return Err(TemplateError::structural(
                "'end' without a matching open block",
                fragment.raw,
                fragment.line,
            ));
        }
        if let Some(scope) = self.scopes.pop() {
            log::trace!(
                "exit {} scope opened at line {}",
                self.tree.node(scope.node).kind.label(),
                scope.line
            );
        }
        Ok(())
    }

    fn mark_else(&mut self, fragment: &Fragment<'_>) -> Result<(), TemplateError> {
        if !fragment.arguments().is_empty() {
            return Err(TemplateError::syntax(
                "else takes no arguments",
                fragment.raw,
                fragment.line,
            ));
        }
        match self.current().state {
            ScopeState::InIfThen => {
                self.append(NodeKind::Else, fragment);
                self.current_mut().state = ScopeState::InIfElse;
                Ok(())
            }
            ScopeState::InIfElse => Err(TemplateError::structural(
                "duplicate 'else' in the same 'if' block",
                fragment.raw,
                fragment.line,
            )),
            ScopeState::AtRoot | ScopeState::InEach => Err(TemplateError::structural(
                "'else' outside of an 'if' block",
                fragment.raw,
                fragment.line,
            )),
        }
    }

    fn finish(self) -> Result<Tree, TemplateError> {
        if self.scopes.len() > 1 {
            let scope = self.current();
            return Err(TemplateError::structural(
                "block is never closed with 'end'",
                &scope.opened_by,
                scope.line,
            ));
        }
        log::debug!("compiled template into {} nodes", self.tree.len());
        Ok(self.tree)
    }
}

/// `value` or `lhs op rhs`
fn parse_condition(source: &str, fragment: &Fragment<'_>) -> Result<Condition, TemplateError> {
    match split_args(source).as_slice() {
        [value] => Ok(Condition::Truthy(Expr::parse(value)?)),
        [lhs, op, rhs] => {
            let op = CompareOp::parse(op).ok_or_else(|| {
                TemplateError::syntax(
                    format!("unknown operator '{}'", op),
                    fragment.raw,
                    fragment.line,
                )
            })?;
            Ok(Condition::Compare {
                lhs: Expr::parse(lhs)?,
                op,
                rhs: Expr::parse(rhs)?,
            })
        }
        _ => Err(TemplateError::syntax(
            "if expects 'value' or 'lhs op rhs'",
            fragment.raw,
            fragment.line,
        )),
    }
}

/// `target arg... key=value...`
fn parse_call(source: &str, fragment: &Fragment<'_>) -> Result<CallSite, TemplateError> {
    let args = split_args(source);
    let (target, params) = args.split_first().ok_or_else(|| {
        TemplateError::syntax("call expects a function name", fragment.raw, fragment.line)
    })?;

    let target = match Expr::parse(target)? {
        Expr::Name(name) => name,
        Expr::Literal(_) => {
            return Err(TemplateError::syntax(
                format!("call target '{}' must be a name", target),
                fragment.raw,
                fragment.line,
            ))
        }
    };

    let mut call = CallSite {
        target,
        args: Vec::new(),
        kwargs: Vec::new(),
    };
    for param in params {
        match split_kwarg(param) {
            Some((key, value)) => {
                if call.kwargs.iter().any(|(existing, _)| existing == key) {
                    return Err(TemplateError::syntax(
                        format!("duplicate keyword argument '{}'", key),
                        fragment.raw,
                        fragment.line,
                    ));
                }
                call.kwargs.push((key.to_string(), Expr::parse(value)?));
            }
            None => call.args.push(Expr::parse(param)?),
        }
    }
    Ok(call)
}
