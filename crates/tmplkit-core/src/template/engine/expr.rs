//! Expressions inside tags: literals, names and comparisons
//!
//! The literal grammar is deliberately narrow. A token is first parsed as a
//! literal; when that fails it must be a valid name.
//!
//! ```text
//! literal := int | float | string | list | true | false | none
//! list    := '[' (literal (',' literal)* ','?)? ']'
//! string  := '\'' chars '\'' | '"' chars '"'
//! name    := '..'* head ('.' segment)*
//! head    := segment not starting with a digit or '-'
//! segment := [A-Za-z0-9_-]+
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::template::error::TemplateError;

use super::context::PARENT_PREFIX;
use super::value::Value;

/// A dotted context name such as `post.title` or `..site.url`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    raw: String,
    parent_hops: usize,
    segments: Vec<String>,
}

impl Name {
    /// Parse a name, returning `None` if it is not a valid name
    pub fn parse(raw: &str) -> Option<Self> {
        let mut rest = raw;
        let mut parent_hops = 0;
        while let Some(stripped) = rest.strip_prefix(PARENT_PREFIX) {
            parent_hops += 1;
            rest = stripped;
        }

        let segments: Vec<String> = rest.split('.').map(str::to_string).collect();
        let valid = segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        });
        let numeric_head = segments
            .first()
            .is_some_and(|head| head.starts_with(|c: char| c.is_ascii_digit() || c == '-'));
        if !valid || numeric_head {
            return None;
        }

        Some(Self {
            raw: raw.to_string(),
            parent_hops,
            segments,
        })
    }

    /// The name as written in the template
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of leading `..` prefixes
    pub fn parent_hops(&self) -> usize {
        self.parent_hops
    }

    /// Path segments after the parent prefixes
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A literal value or a name to resolve at render time
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Name(Name),
}

impl Expr {
    /// Parse a single expression token: literal first, then name
    pub fn parse(token: &str) -> Result<Self, TemplateError> {
        if let Some(value) = parse_literal(token) {
            return Ok(Expr::Literal(value));
        }
        Name::parse(token).map(Expr::Name).ok_or_else(|| {
            let message = if looks_numeric(token) {
                "invalid or out-of-range number literal"
            } else {
                "not a literal or a name"
            };
            TemplateError::expression(message, token)
        })
    }
}

fn looks_numeric(token: &str) -> bool {
    token
        .trim_start_matches(['-', '+'])
        .starts_with(|c: char| c.is_ascii_digit())
}

/// Parse `text` with the literal grammar
///
/// Returns `None` when `text` is not exactly one literal.
pub fn parse_literal(text: &str) -> Option<Value> {
    let mut parser = LiteralParser { text, pos: 0 };
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    (parser.pos == text.len()).then_some(value)
}

struct LiteralParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn parse_value(&mut self) -> Option<Value> {
        match self.peek()? {
            '[' => self.parse_list(),
            quote @ ('\'' | '"') => self.parse_string(quote),
            c if c.is_ascii_digit() || c == '-' || c == '+' => self.parse_number(),
            _ => self.parse_keyword(),
        }
    }

    fn parse_list(&mut self) -> Option<Value> {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek()? == ']' {
                self.pos += 1;
                return Some(Value::List(items));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek()? {
                ',' => self.pos += 1,
                ']' => {
                    self.pos += 1;
                    return Some(Value::List(items));
                }
                _ => return None,
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Option<Value> {
        self.pos += quote.len_utf8();
        let mut out = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((idx, c)) = chars.next() {
            match c {
                c if c == quote => {
                    self.pos += idx + c.len_utf8();
                    return Some(Value::String(out));
                }
                '\\' => {
                    let (_, escaped) = chars.next()?;
                    out.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        other => other,
                    });
                }
                c => out.push(c),
            }
        }
        None
    }

    fn parse_number(&mut self) -> Option<Value> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
            .unwrap_or(rest.len());
        let token = &rest[..len];

        let digits = token.trim_start_matches(['-', '+']);
        if !digits.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        let value = if token.contains(['.', 'e', 'E']) {
            Value::Float(token.parse().ok()?)
        } else {
            Value::Int(token.parse().ok()?)
        };
        self.pos += len;
        Some(value)
    }

    fn parse_keyword(&mut self) -> Option<Value> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let value = match &rest[..len] {
            "true" | "True" => Value::Bool(true),
            "false" | "False" => Value::Bool(false),
            "none" | "None" | "null" => Value::Null,
            _ => return None,
        };
        self.pos += len;
        Some(value)
    }
}

/// Split block arguments on whitespace, keeping quoted strings and
/// bracketed lists together
pub(crate) fn split_args(text: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut start = None;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    args.push(&text[s..idx]);
                }
                continue;
            }
            '\'' | '"' => quote = Some(c),
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        args.push(&text[s..]);
    }
    args
}

/// Comparison operators allowed in `{% if %}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Is,
}

impl CompareOp {
    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "==" => CompareOp::Eq,
            "!=" => CompareOp::Ne,
            "<" => CompareOp::Lt,
            "<=" => CompareOp::Le,
            ">" => CompareOp::Gt,
            ">=" => CompareOp::Ge,
            "is" => CompareOp::Is,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Is => "is",
        }
    }

    /// Apply the operator to two resolved operands
    ///
    /// `expr` is the source of the whole condition, for error messages.
    pub fn apply(self, lhs: &Value, rhs: &Value, expr: &str) -> Result<bool, TemplateError> {
        let ordering = |lhs: &Value, rhs: &Value| {
            compare(lhs, rhs).ok_or_else(|| {
                TemplateError::expression(
                    format!(
                        "cannot compare {} and {} with '{}'",
                        lhs.type_name(),
                        rhs.type_name(),
                        self.as_str()
                    ),
                    expr,
                )
            })
        };

        Ok(match self {
            CompareOp::Eq => loose_eq(lhs, rhs),
            CompareOp::Ne => !loose_eq(lhs, rhs),
            CompareOp::Is => lhs == rhs,
            CompareOp::Lt => ordering(lhs, rhs)? == Ordering::Less,
            CompareOp::Le => ordering(lhs, rhs)? != Ordering::Greater,
            CompareOp::Gt => ordering(lhs, rhs)? == Ordering::Greater,
            CompareOp::Ge => ordering(lhs, rhs)? != Ordering::Less,
        })
    }
}

/// Equality with `Int` and `Float` compared numerically
fn loose_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => (*a as f64) == *b,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| loose_eq(x, y))
        }
        (Value::Map(a), Value::Map(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|((ka, va), (kb, vb))| ka == kb && loose_eq(va, vb))
        }
        _ => lhs == rhs,
    }
}

/// Ordering for the kinds that have one
fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::List(a), Value::List(b)) => {
            for (x, y) in a.iter().zip(b) {
                match compare(x, y)? {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(a.len().cmp(&b.len()))
        }
        _ => None,
    }
}

/// Condition of an `{% if %}` block
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `{% if value %}`
    Truthy(Expr),
    /// `{% if lhs op rhs %}`
    Compare { lhs: Expr, op: CompareOp, rhs: Expr },
}

/// Target and arguments of a `{% call %}` tag
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    pub target: Name,
    pub args: Vec<Expr>,
    pub kwargs: Vec<(String, Expr)>,
}

/// Split `key=value` if `token` is a keyword argument
pub(crate) fn split_kwarg(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.split_once('=')?;
    let is_ident = !key.is_empty()
        && key.chars().all(|c| c.is_alphanumeric() || c == '_')
        && !key.starts_with(|c: char| c.is_ascii_digit());
    (is_ident && !value.is_empty()).then_some((key, value))
}
