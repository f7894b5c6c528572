//! Builtin callables for `{% call %}`
//!
//! ```text
//! {% call upper title %}            -> TITLE
//! {% call join tags sep=' / ' %}    -> a / b
//! ```

use super::engine::{Context, Kwargs, Value};

/// Longest list `range` will build
pub const MAX_RANGE_LEN: i64 = 1_000_000;

/// Names of every builtin, in installation order
pub const NAMES: [&str; 5] = ["upper", "lower", "len", "join", "range"];

/// Bind every builtin into `context`, keeping existing bindings of the same name
pub fn install(context: &mut Context<'_>) {
    for name in NAMES {
        if context.get(name).is_some() {
            continue;
        }
        match name {
            "upper" => context.insert_function(name, upper),
            "lower" => context.insert_function(name, lower),
            "len" => context.insert_function(name, len),
            "join" => context.insert_function(name, join),
            "range" => context.insert_function(name, range),
            _ => continue,
        };
    }
}

fn single<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, String> {
    match args {
        [value] => Ok(value),
        _ => Err(format!("{} expects 1 argument, got {}", name, args.len())),
    }
}

fn upper(args: &[Value], _kwargs: &Kwargs) -> Result<Value, String> {
    Ok(Value::String(single("upper", args)?.to_string().to_uppercase()))
}

fn lower(args: &[Value], _kwargs: &Kwargs) -> Result<Value, String> {
    Ok(Value::String(single("lower", args)?.to_string().to_lowercase()))
}

fn len(args: &[Value], _kwargs: &Kwargs) -> Result<Value, String> {
    let count = match single("len", args)? {
        Value::String(s) => s.chars().count(),
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        other => return Err(format!("{} has no length", other.type_name())),
    };
    Ok(Value::Int(count as i64))
}

fn join(args: &[Value], kwargs: &Kwargs) -> Result<Value, String> {
    let value = single("join", args)?;
    let items = value
        .as_list()
        .ok_or_else(|| format!("join expects a list, got {}", value.type_name()))?;
    let sep = match kwargs.get("sep") {
        Some(sep) => sep.to_string(),
        None => ", ".to_string(),
    };
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&sep);
    Ok(Value::String(joined))
}

fn range(args: &[Value], _kwargs: &Kwargs) -> Result<Value, String> {
    let bounds: Vec<i64> = args
        .iter()
        .map(|arg| {
            arg.as_int()
                .ok_or_else(|| format!("range expects integers, got {}", arg.type_name()))
        })
        .collect::<Result<_, _>>()?;
    let (start, stop) = match bounds.as_slice() {
        [stop] => (0, *stop),
        [start, stop] => (*start, *stop),
        _ => return Err(format!("range expects 1 or 2 arguments, got {}", args.len())),
    };
    let len = stop.saturating_sub(start);
    if len > MAX_RANGE_LEN {
        return Err(format!(
            "range of {} items exceeds limit of {}",
            len, MAX_RANGE_LEN
        ));
    }
    Ok(Value::List((start..stop).map(Value::Int).collect()))
}
