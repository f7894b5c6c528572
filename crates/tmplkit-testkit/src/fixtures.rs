//! Fixture files for tests

use std::path::{Path, PathBuf};

/// A blog index page exercising every block command
pub const BLOG_INDEX_TEMPLATE: &str = "<h1>{{site.title}}</h1>
{% each posts %}<li>{{it.title}}{% if it.comments > 0 %} ({{it.comments}}){% else %} (none){% end %} on {{..site.title}}</li>
{% end %}{% call upper site.author %}";

/// TOML data matching [`BLOG_INDEX_TEMPLATE`]
pub const BLOG_INDEX_DATA: &str = r#"
[site]
title = "Notes"
author = "ana"

[[posts]]
title = "Hackathon recap"
comments = 3

[[posts]]
title = "A toy template engine"
comments = 0
"#;

/// Write `contents` to `dir/name`, creating parent directories
///
/// # Panics
///
/// Panics if the directories or the file cannot be created
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}
