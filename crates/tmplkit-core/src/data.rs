//! Loading context data from TOML and JSON files

use std::path::Path;

use crate::error::{Result, TmplkitError};
use crate::template::{parse_literal, Map, Value};

/// Read a `.toml` or `.json` file whose top level is a table or object
pub fn load_file(path: &Path) -> Result<Map> {
    let content = std::fs::read_to_string(path)?;
    let parse_error = |reason: String| TmplkitError::DataParseError {
        path: path.to_path_buf(),
        reason,
    };

    let value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Value::from(
            toml::from_str::<toml::Value>(&content).map_err(|e| parse_error(e.to_string()))?,
        ),
        Some("json") => Value::from(
            serde_json::from_str::<serde_json::Value>(&content)
                .map_err(|e| parse_error(e.to_string()))?,
        ),
        _ => {
            return Err(TmplkitError::DataUnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    match value {
        Value::Map(map) => {
            log::debug!("loaded {} keys from {}", map.len(), path.display());
            Ok(map)
        }
        _ => Err(TmplkitError::DataNotATable {
            path: path.to_path_buf(),
        }),
    }
}

/// Convert a TOML table (for example `[context.globals]`) into context values
pub fn from_table(table: toml::Table) -> Map {
    table
        .into_iter()
        .map(|(key, value)| (key, Value::from(value)))
        .collect()
}

/// Parse a `KEY=VALUE` assignment from the command line
///
/// The value is read with the literal grammar; anything that is not a
/// literal is kept as a plain string.
pub fn parse_assignment(assignment: &str) -> Result<(String, Value)> {
    let (key, raw) = assignment
        .split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .ok_or_else(|| TmplkitError::DataInvalidAssignment(assignment.to_string()))?;
    let value = parse_literal(raw).unwrap_or_else(|| Value::String(raw.to_string()));
    Ok((key.trim().to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmplkit_testkit::{temp_dir_in_workspace, write_fixture};

    #[test]
    fn test_load_toml() {
        let temp = temp_dir_in_workspace();
        let path = write_fixture(temp.path(), "site.toml", "title = 'Blog'\n[a]\nb = 7\n");
        let map = load_file(&path).unwrap();
        assert_eq!(map["title"], Value::from("Blog"));
        assert_eq!(map["a"].as_map().unwrap()["b"], Value::Int(7));
    }

    #[test]
    fn test_load_json() {
        let temp = temp_dir_in_workspace();
        let path = write_fixture(temp.path(), "site.json", r#"{"posts": [1, 2]}"#);
        let map = load_file(&path).unwrap();
        assert_eq!(map["posts"], Value::from(vec![1, 2]));
    }

    #[test]
    fn test_load_rejects_non_table() {
        let temp = temp_dir_in_workspace();
        let path = write_fixture(temp.path(), "list.json", "[1, 2]");
        assert!(matches!(
            load_file(&path),
            Err(TmplkitError::DataNotATable { .. })
        ));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let temp = temp_dir_in_workspace();
        let path = write_fixture(temp.path(), "site.yaml", "title: x");
        assert!(matches!(
            load_file(&path),
            Err(TmplkitError::DataUnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let temp = temp_dir_in_workspace();
        let path = write_fixture(temp.path(), "broken.toml", "title = ");
        assert!(matches!(
            load_file(&path),
            Err(TmplkitError::DataParseError { .. })
        ));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("count=3").unwrap(),
            ("count".to_string(), Value::Int(3))
        );
        assert_eq!(
            parse_assignment("name=Ada Lovelace").unwrap(),
            ("name".to_string(), Value::from("Ada Lovelace"))
        );
        assert_eq!(
            parse_assignment("tags=['a', 'b']").unwrap(),
            ("tags".to_string(), Value::from(vec!["a", "b"]))
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=3").is_err());
    }
}
