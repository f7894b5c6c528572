//! Render context and name resolution

use crate::template::error::TemplateError;

use super::expr::Name;
use super::value::{Function, Map, Value};

/// Name bound to the current element inside `{% each %}`
pub const ITEM_NAME: &str = "it";

/// Prefix that moves name resolution to the enclosing context
pub const PARENT_PREFIX: &str = "..";

/// Name-to-value mapping a template is rendered against
///
/// Loop bodies render against a child context that only binds [`ITEM_NAME`];
/// names of the enclosing context are reached explicitly with `..name`.
#[derive(Debug, Clone, Default)]
pub struct Context<'p> {
    vars: Map,
    parent: Option<&'p Context<'p>>,
}

impl Context<'static> {
    /// Create an empty root context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root context from a map of values
    pub fn from_map(vars: Map) -> Self {
        Self { vars, parent: None }
    }
}

impl<'p> Context<'p> {
    /// Bind a value, replacing any previous binding of the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Bind a callable
    pub fn insert_function<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&[Value], &super::value::Kwargs) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.insert(name, Function::new(f))
    }

    /// Merge all bindings of `vars` into this context
    pub fn extend(&mut self, vars: Map) -> &mut Self {
        self.vars.extend(vars);
        self
    }

    /// Look up a top-level binding of this context only
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Bindings of this context, without the parent's
    pub fn vars(&self) -> &Map {
        &self.vars
    }

    /// Enclosing context, if any
    pub fn parent(&self) -> Option<&Context<'p>> {
        self.parent
    }

    /// Create a child context for one loop iteration
    pub fn child(&self, item: Value) -> Context<'_> {
        let mut vars = Map::new();
        vars.insert(ITEM_NAME.to_string(), item);
        Context {
            vars,
            parent: Some(self),
        }
    }

    /// Resolve a dotted name against this context
    ///
    /// Each leading `..` climbs to the enclosing context. Every remaining
    /// segment descends one level into a map (or list, for integer segments).
    /// Any failure reports the full original expression.
    pub fn resolve(&self, name: &Name) -> Result<&Value, TemplateError> {
        let mut scope = self;
        for _ in 0..name.parent_hops() {
            scope = scope
                .parent
                .ok_or_else(|| TemplateError::context(name.as_str()))?;
        }

        let mut segments = name.segments().iter();
        let first = segments
            .next()
            .ok_or_else(|| TemplateError::context(name.as_str()))?;
        let mut current = scope
            .vars
            .get(first)
            .ok_or_else(|| TemplateError::context(name.as_str()))?;

        for segment in segments {
            current = lookup(current, segment).ok_or_else(|| TemplateError::context(name.as_str()))?;
        }
        Ok(current)
    }
}

/// Descend one segment into a value
fn lookup<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Map(map) => map.get(segment),
        Value::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

impl From<Map> for Context<'static> {
    fn from(vars: Map) -> Self {
        Context::from_map(vars)
    }
}
