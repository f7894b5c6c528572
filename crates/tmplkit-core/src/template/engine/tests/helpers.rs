//! Shared test helpers for template engine tests

use crate::data::from_table;
use crate::template::engine::Context;

fn context_from_toml(source: &str) -> Context<'static> {
    let table: toml::Table = toml::from_str(source).unwrap();
    Context::from_map(from_table(table))
}

/// Context with basic scalar values
pub(super) fn simple_context() -> Context<'static> {
    context_from_toml(
        r#"
title = "My Title"
count = 42
price = 9.99
enabled = true
empty = ""
"#,
    )
}

/// Context shaped like a blog index: site settings and a list of posts
pub(super) fn blog_context() -> Context<'static> {
    context_from_toml(
        r#"
[site]
title = "Notes"
author = "ana"

[[posts]]
title = "Hackathon recap"
comments = 3
tags = ["events", "rust"]

[[posts]]
title = "A toy template engine"
comments = 0
tags = []
"#,
    )
}
