//! Demo page modules
//!
//! Keys are the module paths relative to the crate's `src/` directory, so
//! the route table compiles them with `routes` as the routes root. Table
//! order is the order of this list.

use rssr::PageModule;

mod actions;
#[path = "blog/[slug].rs"]
mod blog_slug;
#[path = "catchall/[...segments].rs"]
mod catchall_segments;
mod index;
#[path = "nested/example.rs"]
mod nested_example;

pub fn modules() -> Vec<(&'static str, PageModule)> {
    vec![
        ("routes/actions.rs", actions::page()),
        ("routes/blog/[slug].rs", blog_slug::page()),
        ("routes/catchall/[...segments].rs", catchall_segments::page()),
        ("routes/index.rs", index::page()),
        ("routes/nested/example.rs", nested_example::page()),
    ]
}
