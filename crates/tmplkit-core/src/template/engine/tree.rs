//! Arena storage for compiled templates
//!
//! All nodes live in one append-only list and refer to their children by
//! index, so the tree has a single owner and no back-references.

use std::sync::OnceLock;

use super::expr::{CallSite, Condition, Expr};

/// Index of a node in its [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Node classification and payload
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Root,
    Text(String),
    Variable(Expr),
    If {
        condition: Condition,
        /// Source of the condition, for error messages
        source: String,
        branches: BranchCache,
    },
    Each {
        source: Expr,
    },
    Call(CallSite),
    /// Split point between the then and else children of an `if`
    Else,
}

impl NodeKind {
    /// Whether the node collects the following siblings until `{% end %}`
    pub fn creates_scope(&self) -> bool {
        matches!(self, NodeKind::If { .. } | NodeKind::Each { .. })
    }

    /// Short label used in logs and error messages
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Text(_) => "text",
            NodeKind::Variable(_) => "variable",
            NodeKind::If { .. } => "if",
            NodeKind::Each { .. } => "each",
            NodeKind::Call(_) => "call",
            NodeKind::Else => "else",
        }
    }
}

/// A node and its children in document order
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
    /// Line of the fragment that produced the node
    pub line: usize,
}

/// Then/else partition of an `if` node's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branches {
    /// Position of the else marker among the children, if any
    else_at: Option<usize>,
}

impl Branches {
    pub fn then_branch<'n>(&self, children: &'n [NodeId]) -> &'n [NodeId] {
        match self.else_at {
            Some(at) => &children[..at],
            None => children,
        }
    }

    pub fn else_branch<'n>(&self, children: &'n [NodeId]) -> &'n [NodeId] {
        match self.else_at {
            Some(at) => &children[at + 1..],
            None => &[],
        }
    }
}

/// Write-once cache for [`Branches`], filled on first render
///
/// The cache is not part of the tree's structure: two trees compare equal
/// whether or not their caches have been filled.
#[derive(Debug, Clone, Default)]
pub struct BranchCache(OnceLock<Branches>);

impl BranchCache {
    pub fn get_or_init(&self, f: impl FnOnce() -> Branches) -> Branches {
        *self.0.get_or_init(f)
    }

    pub fn is_filled(&self) -> bool {
        self.0.get().is_some()
    }
}

impl PartialEq for BranchCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// Compiled template tree
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                children: Vec::new(),
                line: 1,
            }],
        }
    }

    /// Append a node as the last child of `parent`
    pub(crate) fn push(&mut self, parent: NodeId, kind: NodeKind, line: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
            line,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn root(&self) -> &Node {
        self.node(Self::ROOT)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root().children.is_empty()
    }

    /// Then/else partition of an `if` node, computed once
    pub(crate) fn branches(&self, id: NodeId, cache: &BranchCache) -> Branches {
        cache.get_or_init(|| {
            let else_at = self
                .node(id)
                .children
                .iter()
                .position(|child| matches!(self.node(*child).kind, NodeKind::Else));
            Branches { else_at }
        })
    }

    /// Indented outline of the tree, one node per line
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_node(Self::ROOT, 0, &mut out);
        out
    }

    fn outline_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        out.push_str(&"  ".repeat(depth));
        out.push_str(node.kind.label());
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&format!(" {:?}", text)),
            NodeKind::Variable(expr) | NodeKind::Each { source: expr } => {
                out.push_str(&format!(" {}", describe(expr)))
            }
            NodeKind::If { source, .. } => out.push_str(&format!(" {}", source)),
            NodeKind::Call(call) => out.push_str(&format!(" {}", call.target)),
            NodeKind::Root | NodeKind::Else => {}
        }
        out.push('\n');
        for child in &node.children {
            self.outline_node(*child, depth + 1, out);
        }
    }
}

fn describe(expr: &Expr) -> String {
    match expr {
        Expr::Literal(value) => format!("{:?}", value),
        Expr::Name(name) => name.to_string(),
    }
}
