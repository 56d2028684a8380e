//! Page geometry for the cheat sheet.
//!
//! The content area (page minus margins) is divided into a 2 × 4 grid. One grid cell is
//! an eighth of the page, which is the footprint of an A7 box.

use serde::{Deserialize, Serialize};

/// A4 portrait in PostScript points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

pub const GRID_COLUMNS: u32 = 2;
pub const GRID_ROWS: u32 = 4;

/// Grid cells on one page.
pub const UNITS_PER_PAGE: u32 = GRID_COLUMNS * GRID_ROWS;

pub const DEFAULT_MAX_PAGES: u32 = 2;

/// Layout parameters for the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// Outer margin, applied on all four sides.
    pub margin_pt: f32,
    /// Space between neighbouring boxes.
    pub gutter_pt: f32,
    /// Hard page budget. Layouts that need more pages fail with `CapacityError`.
    pub max_pages: u32,
    pub title_size_pt: f32,
    pub body_size_pt: f32,
    /// Baseline-to-baseline distance as a multiple of `body_size_pt`.
    pub line_height: f32,
    /// Inner padding between box border and text.
    pub padding_pt: f32,
}

/// Returns the default page config: A4 portrait, 2 pages, small type for density.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_pt: A4_WIDTH_PT,
        page_height_pt: A4_HEIGHT_PT,
        margin_pt: 12.0,
        gutter_pt: 5.0,
        max_pages: DEFAULT_MAX_PAGES,
        title_size_pt: 7.5,
        body_size_pt: 6.5,
        line_height: 1.25,
        padding_pt: 3.5,
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        default_page_config()
    }
}

impl PageConfig {
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn content_width(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }

    pub fn content_height(&self) -> f32 {
        self.page_height_pt - 2.0 * self.margin_pt
    }

    pub fn cell_width(&self) -> f32 {
        self.content_width() / GRID_COLUMNS as f32
    }

    pub fn cell_height(&self) -> f32 {
        self.content_height() / GRID_ROWS as f32
    }

    /// Total grid cells available across all pages.
    pub fn capacity_units(&self) -> u32 {
        self.max_pages * UNITS_PER_PAGE
    }

    pub fn body_line_height_pt(&self) -> f32 {
        self.body_size_pt * self.line_height
    }

    /// Checks that the geometry leaves room for at least one cell with padding.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_pages == 0 {
            return Err("max_pages must be at least 1".to_string());
        }
        if self.body_size_pt <= 0.0 || self.title_size_pt <= 0.0 || self.line_height <= 0.0 {
            return Err("font sizes and line height must be positive".to_string());
        }
        let inner_width = self.cell_width() - self.gutter_pt - 2.0 * self.padding_pt;
        let inner_height = self.cell_height() - self.gutter_pt - 2.0 * self.padding_pt;
        if inner_width <= 0.0 || inner_height <= 0.0 {
            return Err(format!(
                "margins, gutter and padding leave no room for content \
                 (inner cell {inner_width:.1} x {inner_height:.1} pt)"
            ));
        }
        Ok(())
    }
}
