// Page layout for PDF export: glyph metrics, word wrap, pagination.
// Pagination is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod flow;
pub mod font_metrics;
pub mod wrap;

pub use flow::{paginate, Page, PageGeometry};
pub use font_metrics::{FontFace, FontFamily};
