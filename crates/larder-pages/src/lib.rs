//! Shell and section HTML assembly for the Larder workloads.
//!
//! Pages are built as a shell (head, opening and closing body HTML)
//! around an ordered list of named sections. Workloads render each
//! section from its own data and hand the strings here.

mod page;
mod shell;

pub use page::{html_escape, PageBuilder};
pub use shell::{HeadContent, Shell};
