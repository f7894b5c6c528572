use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub fn print_json(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

pub fn print_text(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

/// Write rendered output verbatim, to `path` or stdout
pub fn write_rendered(s: &str, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, s)
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(s.as_bytes())?;
            out.flush()
        }
    }
}
