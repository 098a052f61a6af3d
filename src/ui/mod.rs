//! Server-rendered dashboard
//!
//! The static style sheet and the HTML page built for every render cycle.

pub mod page;
pub mod style;

pub use page::{escape_html, format_hours, render_page, FormValues, PageView};
pub use style::APP_CSS;
