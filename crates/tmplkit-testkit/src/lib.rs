//! Shared test support for the tmplkit crates
//!
//! Temporary directories live under `.tmp/` of the directory the test runs
//! in, next to the template and data fixtures written into them.

mod fixtures;

pub use fixtures::{BLOG_INDEX_DATA, BLOG_INDEX_TEMPLATE, write_fixture};

use tempfile::TempDir;

/// Fresh directory under `./.tmp/`, removed when dropped
///
/// # Panics
///
/// Panics if `.tmp/` or the directory inside it cannot be created
///
/// # Examples
///
/// ```rust
/// use tmplkit_testkit::{temp_dir_in_workspace, write_fixture};
///
/// let temp = temp_dir_in_workspace();
/// let path = write_fixture(temp.path(), "page.tmpl", "{{title}}");
/// assert!(path.exists());
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Fallible variant of [`temp_dir_in_workspace`]
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&base)?;
    TempDir::new_in(&base)
}
