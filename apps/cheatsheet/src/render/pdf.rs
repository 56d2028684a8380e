//! PDF page renderer.
//!
//! Places every box on the page grid, then draws it as a tinted rectangle with a coloured
//! header bar and wrapped body lines. Content that does not fit its slot is clipped at the
//! slot edge and reported with a warning; placement never moves a box to make room.
//!
//! Fonts are the standard Helvetica pair (nothing embedded) and content streams are
//! zlib-compressed. The document carries no timestamps or IDs, so identical input yields
//! byte-identical output.

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};
use thiserror::Error;
use tracing::{debug, warn};

use crate::boxes::parser::BULLET_GLYPH;
use crate::boxes::{ContentBox, ContentLine};
use crate::layout::font_metrics::{get_metrics, FontWeight};
use crate::layout::page::PageConfig;
use crate::layout::palette::{colors_for, Rgb};
use crate::layout::placement::{pages_used, plan, BoxRect, CapacityError, Placement};
use crate::layout::text::{inline_spans, wrap_spans, Span, WrappedLine};
use crate::render::encoding::{normalize_symbols, to_winansi_bytes};

// ────────────────────────────────────────────────────────────────────────────
// Constants
// ────────────────────────────────────────────────────────────────────────────

/// Header bar height as a multiple of the title font size.
const HEADER_HEIGHT_FACTOR: f32 = 1.7;
/// Extra indent per nesting level of a bullet.
const DEPTH_INDENT_PT: f32 = 6.0;
const BORDER_WIDTH_PT: f32 = 0.6;
/// Baseline offset from the top of a text line, as a fraction of the font size.
const ASCENT_FACTOR: f32 = 0.8;
/// Vertical gap before a new paragraph, as a fraction of the body line height.
const PARAGRAPH_GAP_FACTOR: f32 = 0.5;
/// Code font size as a fraction of the body size.
const CODE_SIZE_FACTOR: f32 = 0.9;
const CODE_TAB: &str = "    ";
const ELLIPSIS: &str = "...";
const ZLIB_LEVEL: u8 = 6;

// ────────────────────────────────────────────────────────────────────────────
// Errors and output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error("invalid page configuration: {0}")]
    InvalidConfig(String),
}

/// A rendered document plus what the renderer did to produce it.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub bytes: Vec<u8>,
    pub placements: Vec<Placement>,
    pub pages: u32,
    /// Wrapped body lines that fell outside their box and were not drawn.
    pub clipped_lines: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Renders boxes to PDF bytes.
pub fn render(boxes: &[ContentBox], config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    render_with_report(boxes, config).map(|out| out.bytes)
}

/// Renders boxes to PDF bytes and returns placement and clipping details alongside.
///
/// An empty box list renders a single blank page.
pub fn render_with_report(
    boxes: &[ContentBox],
    config: &PageConfig,
) -> Result<RenderOutput, RenderError> {
    config.validate().map_err(RenderError::InvalidConfig)?;
    let placements = plan(boxes, config.max_pages)?;
    let page_count = pages_used(&placements).max(1);

    let mut contents: Vec<Content> = (0..page_count).map(|_| Content::new()).collect();
    let mut clipped_lines = 0;
    for placement in &placements {
        let content_box = &boxes[placement.box_index];
        let rect = placement.rect(config);
        clipped_lines += draw_box(
            &mut contents[placement.page as usize],
            content_box,
            placement.box_index,
            rect,
            config,
        );
    }

    let bytes = assemble(contents, config);
    debug!(
        boxes = boxes.len(),
        pages = page_count,
        clipped_lines,
        bytes = bytes.len(),
        "rendered cheat sheet"
    );

    Ok(RenderOutput {
        bytes,
        placements,
        pages: page_count,
        clipped_lines,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

fn assemble(contents: Vec<Content>, config: &PageConfig) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let fonts: Vec<(FontWeight, Ref)> = [FontWeight::Regular, FontWeight::Bold, FontWeight::Mono]
        .into_iter()
        .map(|weight| (weight, alloc()))
        .collect();
    let page_ids: Vec<Ref> = contents.iter().map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = contents.iter().map(|_| alloc()).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    for (weight, font_ref) in &fonts {
        pdf.type1_font(*font_ref)
            .base_font(Name(weight.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (i, content) in contents.into_iter().enumerate() {
        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), ZLIB_LEVEL);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);

        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, config.page_width_pt, config.page_height_pt))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for (weight, font_ref) in &fonts {
            font_dict.pair(Name(weight.resource_name().as_bytes()), *font_ref);
        }
    }

    pdf.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Box drawing
// ────────────────────────────────────────────────────────────────────────────

/// A body line ready to draw: an optional hanging label and the wrapped text after it.
struct LaidOutLine {
    label: Option<Span>,
    label_x: f32,
    text_x: f32,
    size: f32,
    lines: Vec<WrappedLine>,
}

/// Draws one box and returns how many wrapped lines had to be clipped.
fn draw_box(
    content: &mut Content,
    content_box: &ContentBox,
    box_index: usize,
    rect: BoxRect,
    config: &PageConfig,
) -> usize {
    let colors = colors_for(box_index);
    let header_h = config.title_size_pt * HEADER_HEIGHT_FACTOR;

    content.save_state();
    set_fill(content, colors.background);
    content.rect(rect.x, rect.y, rect.width, rect.height).fill_nonzero();

    set_fill(content, colors.accent);
    content
        .rect(rect.x, rect.top() - header_h, rect.width, header_h)
        .fill_nonzero();

    content
        .set_stroke_rgb(colors.accent.r, colors.accent.g, colors.accent.b)
        .set_line_width(BORDER_WIDTH_PT)
        .rect(rect.x, rect.y, rect.width, rect.height)
        .stroke();
    content.restore_state();

    let text_left = rect.x + config.padding_pt;
    let text_width = rect.width - 2.0 * config.padding_pt;

    if !content_box.title.is_empty() {
        let title = truncate_to_width(
            &normalize_symbols(&content_box.title),
            FontWeight::Bold,
            config.title_size_pt,
            text_width,
        );
        let baseline = rect.top() - header_h / 2.0 - config.title_size_pt * 0.35;
        let run = Span::new(title, FontWeight::Bold);
        draw_runs(
            content,
            std::slice::from_ref(&run),
            text_left,
            baseline,
            config.title_size_pt,
            Rgb::WHITE,
        );
    }

    // Body text is clipped to the box below the header.
    content.save_state();
    content
        .rect(rect.x, rect.y, rect.width, rect.height - header_h)
        .clip_nonzero()
        .end_path();

    let line_h = config.body_line_height_pt();
    let size = config.body_size_pt;
    let bottom = rect.y + config.padding_pt;
    let mut line_top = rect.top() - header_h - config.padding_pt;
    let mut drawn = 0;
    let mut total = 0;

    for (i, line) in content_box.body.iter().enumerate() {
        if i > 0 && content_box.starts_paragraph(i) {
            line_top -= line_h * PARAGRAPH_GAP_FACTOR;
        }
        let laid = lay_out_line(line, text_left, text_width, size);
        for (j, wrapped) in laid.lines.iter().enumerate() {
            total += 1;
            if line_top - line_h < bottom - 1e-3 {
                continue;
            }
            let baseline = line_top - size * ASCENT_FACTOR;
            if j == 0 {
                if let Some(label) = &laid.label {
                    let label = std::slice::from_ref(label);
                    draw_runs(content, label, laid.label_x, baseline, size, Rgb::TEXT);
                }
            }
            draw_runs(content, &wrapped.runs, laid.text_x, baseline, laid.size, Rgb::TEXT);
            line_top -= line_h;
            drawn += 1;
        }
    }
    content.restore_state();

    let clipped = total - drawn;
    if clipped > 0 {
        warn!(
            box_index,
            title = %content_box.title,
            size_class = %content_box.size_class,
            clipped_lines = clipped,
            "box content overflows its slot; extra lines were clipped"
        );
    }
    clipped
}

fn lay_out_line(line: &ContentLine, left: f32, width: f32, size: f32) -> LaidOutLine {
    let regular = get_metrics(FontWeight::Regular);
    let (label, label_x, spans) = match line {
        ContentLine::Text(text) => (None, left, inline_spans(&normalize_symbols(text))),
        ContentLine::Bullet { text, depth } => {
            let label = Span::new(format!("{BULLET_GLYPH} "), FontWeight::Regular);
            let x = left + f32::from(*depth) * DEPTH_INDENT_PT;
            (Some(label), x, inline_spans(&normalize_symbols(text)))
        }
        ContentLine::Numbered { numeral, text } => {
            let label = Span::new(format!("{numeral}. "), FontWeight::Regular);
            (Some(label), left, inline_spans(&normalize_symbols(text)))
        }
        ContentLine::Code(code) => return lay_out_code(code, left, size * CODE_SIZE_FACTOR),
        ContentLine::BoldTerm { term, explanation } => {
            let mut spans = vec![Span::new(normalize_symbols(term), FontWeight::Bold)];
            if !explanation.is_empty() {
                if !explanation.starts_with([':', ',', '.', ';', ')']) {
                    spans.push(Span::new(" ", FontWeight::Regular));
                }
                spans.extend(inline_spans(&normalize_symbols(explanation)));
            }
            (None, left, spans)
        }
    };

    let hang = label
        .as_ref()
        .map(|l| regular.width_pt(&l.text, size))
        .unwrap_or(0.0);
    let text_x = label_x + hang;
    let available = (left + width - text_x).max(size);

    LaidOutLine {
        label,
        label_x,
        text_x,
        size,
        lines: wrap_spans(&spans, available, size),
    }
}

/// One unwrapped Courier line. Anything past the box edge is cut by the clip path.
fn lay_out_code(code: &str, left: f32, size: f32) -> LaidOutLine {
    let text = normalize_symbols(&code.replace('\t', CODE_TAB));
    let runs = if text.is_empty() {
        Vec::new()
    } else {
        vec![Span::new(text, FontWeight::Mono)]
    };
    let width_pt = runs.iter().map(|r| r.width_pt(size)).sum();
    LaidOutLine {
        label: None,
        label_x: left,
        text_x: left,
        size,
        lines: vec![WrappedLine { runs, width_pt }],
    }
}

fn draw_runs(content: &mut Content, runs: &[Span], x: f32, baseline: f32, size: f32, color: Rgb) {
    if runs.is_empty() {
        return;
    }
    set_fill(content, color);
    content.begin_text().next_line(x, baseline);
    for run in runs {
        content
            .set_font(Name(run.weight.resource_name().as_bytes()), size)
            .show(Str(&to_winansi_bytes(&run.text)));
    }
    content.end_text();
}

fn set_fill(content: &mut Content, color: Rgb) {
    content.set_fill_rgb(color.r, color.g, color.b);
}

/// Shortens `text` with a trailing `...` until it fits `max_width_pt`.
fn truncate_to_width(text: &str, weight: FontWeight, size_pt: f32, max_width_pt: f32) -> String {
    let metrics = get_metrics(weight);
    if metrics.width_pt(text, size_pt) <= max_width_pt {
        return text.to_string();
    }
    let ellipsis_w = metrics.width_pt(ELLIPSIS, size_pt);
    let mut width = 0.0;
    let mut kept = String::new();
    for c in text.chars() {
        let mut buf = [0u8; 4];
        let w = metrics.width_pt(c.encode_utf8(&mut buf), size_pt);
        if width + w + ellipsis_w > max_width_pt {
            break;
        }
        width += w;
        kept.push(c);
    }
    format!("{}{ELLIPSIS}", kept.trim_end())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
