//! Box placement: assigns every box a slot on the page grid.
//!
//! Every size class is an aligned block of the page grid: A4 is the page, A5 the top or
//! bottom half, A6 one column of a half, A7 one cell of that column. Boxes are handled in
//! input order; each takes the smallest free block that holds it (lowest page, row,
//! column on ties), splitting larger blocks and keeping the remainders free. A new page
//! is opened only when no free block is large enough.
//!
//! Free blocks therefore never share a size, so a free total of at least one box always
//! contains a block for it: any sequence whose footprint fits the page budget is placed.
//! Running past `max_pages` is a `CapacityError`, never a silent drop.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::boxes::{ContentBox, SizeClass};
use crate::layout::page::{PageConfig, GRID_COLUMNS, GRID_ROWS};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// The boxes do not fit in the page budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("box {box_index} ({size_class}) does not fit within {max_pages} page(s)")]
pub struct CapacityError {
    /// Index of the first box that could not be placed.
    pub box_index: usize,
    pub size_class: SizeClass,
    pub max_pages: u32,
}

/// Grid slot assigned to one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub box_index: usize,
    /// 0-based page index.
    pub page: u32,
    pub column: u32,
    pub row: u32,
    pub columns: u32,
    pub rows: u32,
}

/// Rectangle in PDF user space (origin bottom-left, y grows upwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoxRect {
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

impl Placement {
    /// The drawable rectangle for this slot, inset by half the gutter on every side.
    pub fn rect(&self, config: &PageConfig) -> BoxRect {
        let cell_w = config.cell_width();
        let cell_h = config.cell_height();
        let half_gutter = config.gutter_pt / 2.0;

        let width = self.columns as f32 * cell_w - config.gutter_pt;
        let height = self.rows as f32 * cell_h - config.gutter_pt;
        let x = config.margin_pt + self.column as f32 * cell_w + half_gutter;
        let top = config.page_height_pt - config.margin_pt - self.row as f32 * cell_h - half_gutter;

        BoxRect {
            x,
            y: top - height,
            width,
            height,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout state
// ────────────────────────────────────────────────────────────────────────────

/// An aligned block of grid cells on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    page: u32,
    row: u32,
    column: u32,
    columns: u32,
    rows: u32,
}

impl Slot {
    fn whole_page(page: u32) -> Self {
        Self {
            page,
            row: 0,
            column: 0,
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
        }
    }

    fn units(&self) -> u32 {
        self.columns * self.rows
    }

    /// Halves the block: page → halves (rows), half → columns, column → cells (rows).
    fn split(self) -> (Slot, Slot) {
        if self.rows >= 2 * self.columns {
            let rows = self.rows / 2;
            (
                Slot { rows, ..self },
                Slot {
                    row: self.row + rows,
                    rows,
                    ..self
                },
            )
        } else {
            let columns = self.columns / 2;
            (
                Slot { columns, ..self },
                Slot {
                    column: self.column + columns,
                    columns,
                    ..self
                },
            )
        }
    }
}

/// Free blocks and opened pages. Never shared between `plan` calls.
#[derive(Debug, Default)]
struct LayoutState {
    free: Vec<Slot>,
    pages_opened: u32,
}

impl LayoutState {
    /// Closes every opened page so the next box starts a fresh one. No-op before the
    /// first box.
    fn page_break(&mut self) {
        self.free.clear();
    }

    /// Takes a block of exactly the box's span, or `None` once `max_pages` is used up.
    fn allocate(&mut self, size_class: SizeClass, max_pages: u32) -> Option<Slot> {
        let units = size_class.units();
        let best = self
            .free
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.units() >= units)
            .min_by_key(|(_, slot)| (slot.units(), slot.page, slot.row, slot.column))
            .map(|(i, _)| i);

        let mut slot = match best {
            Some(i) => self.free.remove(i),
            None if self.pages_opened < max_pages => {
                self.pages_opened += 1;
                Slot::whole_page(self.pages_opened - 1)
            }
            None => return None,
        };

        while slot.units() > units {
            let (first, rest) = slot.split();
            self.free.push(rest);
            slot = first;
        }
        debug_assert_eq!((slot.columns, slot.rows), size_class.grid_span());
        Some(slot)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Computes the slot for every box, or fails on the first box that overflows the budget.
pub fn plan(boxes: &[ContentBox], max_pages: u32) -> Result<Vec<Placement>, CapacityError> {
    let mut state = LayoutState::default();
    let mut placements = Vec::with_capacity(boxes.len());

    for (index, content_box) in boxes.iter().enumerate() {
        if content_box.page_break_before {
            state.page_break();
        }
        let slot = state
            .allocate(content_box.size_class, max_pages)
            .ok_or(CapacityError {
                box_index: index,
                size_class: content_box.size_class,
                max_pages,
            })?;
        placements.push(Placement {
            box_index: index,
            page: slot.page,
            column: slot.column,
            row: slot.row,
            columns: slot.columns,
            rows: slot.rows,
        });
    }

    debug!(
        boxes = boxes.len(),
        pages = pages_used(&placements),
        "planned box layout"
    );
    Ok(placements)
}

/// Number of pages a plan occupies (0 for an empty plan).
pub fn pages_used(placements: &[Placement]) -> u32 {
    placements.iter().map(|p| p.page + 1).max().unwrap_or(0)
}

/// Sum of the boxes' footprints in grid cells.
pub fn total_units(boxes: &[ContentBox]) -> u32 {
    boxes.iter().map(|b| b.size_class.units()).sum()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page::default_page_config;

    fn boxes_of(classes: &[SizeClass]) -> Vec<ContentBox> {
        classes.iter().map(|c| ContentBox::new(*c)).collect()
    }

    #[test]
    fn test_empty_input_plans_nothing() {
        let placements = plan(&[], 2).unwrap();
        assert!(placements.is_empty());
        assert_eq!(pages_used(&placements), 0);
    }

    #[test]
    fn test_a7_boxes_fill_a_column_of_the_half_first() {
        let placements = plan(&boxes_of(&[SizeClass::A7; 5]), 2).unwrap();
        let slots: Vec<(u32, u32, u32)> = placements
            .iter()
            .map(|p| (p.page, p.row, p.column))
            .collect();
        assert_eq!(
            slots,
            vec![(0, 0, 0), (0, 1, 0), (0, 0, 1), (0, 1, 1), (0, 2, 0)]
        );
    }

    #[test]
    fn test_a6_boxes_sit_side_by_side() {
        let placements = plan(&boxes_of(&[SizeClass::A6; 3]), 1).unwrap();
        let slots: Vec<(u32, u32)> = placements.iter().map(|p| (p.row, p.column)).collect();
        assert_eq!(slots, vec![(0, 0), (0, 1), (2, 0)]);
    }

    #[test]
    fn test_exact_capacity_uses_all_pages() {
        let boxes = boxes_of(&[SizeClass::A7; 16]);
        assert_eq!(total_units(&boxes), default_page_config().capacity_units());
        let placements = plan(&boxes, 2).unwrap();
        assert_eq!(pages_used(&placements), 2);
        let last = placements.last().unwrap();
        assert_eq!((last.page, last.row, last.column), (1, 3, 1));
    }

    #[test]
    fn test_over_capacity_fails_with_first_overflowing_box() {
        let err = plan(&boxes_of(&[SizeClass::A7; 17]), 2).unwrap_err();
        assert_eq!(
            err,
            CapacityError {
                box_index: 16,
                size_class: SizeClass::A7,
                max_pages: 2
            }
        );
    }

    #[test]
    fn test_mixed_classes_at_exact_capacity() {
        // Page 1: A5 on top, two A6 side by side below. Page 2: one A4.
        let boxes = boxes_of(&[SizeClass::A5, SizeClass::A6, SizeClass::A6, SizeClass::A4]);
        let placements = plan(&boxes, 2).unwrap();
        assert_eq!((placements[1].row, placements[1].column), (2, 0));
        assert_eq!((placements[2].row, placements[2].column), (2, 1));
        assert_eq!(placements[3].page, 1);
        assert_eq!(pages_used(&placements), 2);
    }

    #[test]
    fn test_wide_box_after_half_row_starts_new_row() {
        let boxes = boxes_of(&[SizeClass::A6, SizeClass::A5]);
        let placements = plan(&boxes, 1).unwrap();
        assert_eq!((placements[1].row, placements[1].column), (2, 0));
    }

    #[test]
    fn test_cell_under_a7_beside_a6_is_reused() {
        // A6 (2 rows tall) next to an A7: the next A7 fills the cell under the first one.
        let boxes = boxes_of(&[SizeClass::A6, SizeClass::A7, SizeClass::A7]);
        let placements = plan(&boxes, 1).unwrap();
        assert_eq!((placements[1].row, placements[1].column), (0, 1));
        assert_eq!((placements[2].row, placements[2].column), (1, 1));
    }

    #[test]
    fn test_alternating_a7_a6_at_exact_capacity() {
        let mut classes = Vec::new();
        for _ in 0..5 {
            classes.extend([SizeClass::A7, SizeClass::A6]);
        }
        classes.push(SizeClass::A7);
        let boxes = boxes_of(&classes);
        assert_eq!(total_units(&boxes), 16);

        let placements = plan(&boxes, 2).expect("an exact fit must place every box");
        assert_eq!(placements.len(), 11);
        assert_eq!(pages_used(&placements), 2);
        assert_no_overlap(&placements);
    }

    #[test]
    fn test_any_sequence_at_exact_capacity_fits() {
        // Deterministic pseudo-random class sequences, each summing to exactly 16 cells.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..300 {
            let mut classes = Vec::new();
            let mut remaining = 16;
            while remaining > 0 {
                seed = seed
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                let candidates: Vec<SizeClass> = SizeClass::ALL
                    .into_iter()
                    .filter(|c| c.units() <= remaining)
                    .collect();
                let pick = candidates[(seed >> 33) as usize % candidates.len()];
                remaining -= pick.units();
                classes.push(pick);
            }
            let placements = plan(&boxes_of(&classes), 2)
                .unwrap_or_else(|e| panic!("{classes:?} should fit: {e}"));
            assert_no_overlap(&placements);
        }
    }

    fn assert_no_overlap(placements: &[Placement]) {
        let mut seen = std::collections::HashSet::new();
        for p in placements {
            for row in p.row..p.row + p.rows {
                for column in p.column..p.column + p.columns {
                    assert!(row < GRID_ROWS && column < GRID_COLUMNS, "{p:?} leaves the grid");
                    assert!(seen.insert((p.page, row, column)), "{p:?} overlaps another box");
                }
            }
        }
    }

    #[test]
    fn test_a4_always_takes_a_fresh_page() {
        let boxes = boxes_of(&[SizeClass::A7, SizeClass::A4]);
        let placements = plan(&boxes, 2).unwrap();
        assert_eq!((placements[1].page, placements[1].row), (1, 0));
        assert!(plan(&boxes, 1).is_err());
    }

    #[test]
    fn test_page_break_before_skips_to_next_page() {
        let mut boxes = boxes_of(&[SizeClass::A7, SizeClass::A7]);
        boxes[1].page_break_before = true;
        let placements = plan(&boxes, 2).unwrap();
        assert_eq!(placements[1].page, 1);
    }

    #[test]
    fn test_page_break_on_empty_page_is_ignored() {
        let mut boxes = boxes_of(&[SizeClass::A7]);
        boxes[0].page_break_before = true;
        let placements = plan(&boxes, 1).unwrap();
        assert_eq!(placements[0].page, 0);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let boxes = boxes_of(&[
            SizeClass::A6,
            SizeClass::A7,
            SizeClass::A5,
            SizeClass::A7,
            SizeClass::A6,
        ]);
        assert_eq!(plan(&boxes, 2).unwrap(), plan(&boxes, 2).unwrap());
    }

    #[test]
    fn test_rect_stays_inside_margins() {
        let config = default_page_config();
        let placement = Placement {
            box_index: 0,
            page: 0,
            column: 1,
            row: 3,
            columns: 1,
            rows: 1,
        };
        let rect = placement.rect(&config);
        assert!(rect.x + rect.width <= config.page_width_pt - config.margin_pt + 1e-3);
        assert!(rect.y >= config.margin_pt - 1e-3);
        assert!(rect.top() <= config.page_height_pt - config.margin_pt);
    }

    #[test]
    fn test_full_page_rect_spans_content_area_minus_gutter() {
        let config = default_page_config();
        let placement = Placement {
            box_index: 0,
            page: 0,
            column: 0,
            row: 0,
            columns: 2,
            rows: 4,
        };
        let rect = placement.rect(&config);
        assert!((rect.width - (config.content_width() - config.gutter_pt)).abs() < 1e-3);
        assert!((rect.height - (config.content_height() - config.gutter_pt)).abs() < 1e-3);
    }
}
