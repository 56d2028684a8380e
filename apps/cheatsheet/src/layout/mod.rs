// Page layout: font metrics, page geometry, grid placement and text wrapping.
// Everything here is pure and synchronous; the renderer drives it.

pub mod font_metrics;
pub mod page;
pub mod palette;
pub mod placement;
pub mod text;

pub use font_metrics::{get_metrics, FontWeight};
pub use page::{default_page_config, PageConfig};
pub use placement::{pages_used, plan, total_units, BoxRect, CapacityError, Placement};
pub use text::{inline_spans, wrap_spans, Span, WrappedLine};
