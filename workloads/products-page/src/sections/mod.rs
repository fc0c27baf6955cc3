//! Products page sections.

mod detail;
mod filters;
mod header;
mod results;

pub use detail::{meta_description, render_blocks, render_detail, render_not_found};
pub use filters::render_filters;
pub use header::render_header;
pub use results::{render_error, render_loading, render_results};
