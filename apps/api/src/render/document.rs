//! In-memory paginated document.
//!
//! The document is a cursor plus per-page lists of draw operations. Coordinates are in
//! millimetres from the top-left corner of an A4 page; the PDF writer flips them when it
//! serializes. Keeping the operations as plain data lets the layout code be tested without
//! producing a PDF.

use serde::{Deserialize, Serialize};

use crate::render::font_metrics::{metrics, MM_PER_PT};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 10.0;
/// Distance from the bottom edge at which a cell forces a new page.
pub const BOTTOM_MARGIN_MM: f32 = 20.0;

const DEFAULT_FONT_SIZE_PT: f32 = 11.0;
const RULE_THICKNESS_PT: f32 = 0.57;

/// 8-bit RGB color, written as `[r, g, b]` in stylesheet JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// A single positioned drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        /// Baseline position measured from the top of the page.
        baseline: f32,
        text: String,
        size_pt: f32,
        weight: FontWeight,
        color: Rgb,
    },
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        thickness_pt: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone)]
pub struct Document {
    pages: Vec<Page>,
    x: f32,
    y: f32,
    font_size_pt: f32,
    weight: FontWeight,
    text_color: Rgb,
    draw_color: Rgb,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an A4 document with its first page already added.
    pub fn new() -> Self {
        let mut doc = Self {
            pages: Vec::new(),
            x: MARGIN_MM,
            y: MARGIN_MM,
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            weight: FontWeight::Regular,
            text_color: Rgb::BLACK,
            draw_color: Rgb::BLACK,
        };
        doc.add_page();
        doc
    }

    /// Starts a new page and moves the cursor to its top-left margin.
    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.x = MARGIN_MM;
        self.y = MARGIN_MM;
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All operations across all pages, in drawing order.
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.pages.iter().flat_map(|p| p.ops.iter())
    }

    // ── cursor and style state ───────────────────────────────────────────────

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    pub fn left_margin(&self) -> f32 {
        MARGIN_MM
    }

    pub fn right_edge(&self) -> f32 {
        PAGE_WIDTH_MM - MARGIN_MM
    }

    pub fn set_font(&mut self, size_pt: f32, weight: FontWeight) {
        self.font_size_pt = size_pt;
        self.weight = weight;
    }

    pub fn font_size_pt(&self) -> f32 {
        self.font_size_pt
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    pub fn text_color(&self) -> Rgb {
        self.text_color
    }

    pub fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    /// Line break: cursor returns to the left margin and moves down by `h`.
    pub fn ln(&mut self, h: f32) {
        self.x = MARGIN_MM;
        self.y += h;
    }

    // ── drawing primitives ──────────────────────────────────────────────────

    /// Straight line in the current draw color.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let op = DrawOp::Rule {
            x1,
            y1,
            x2,
            y2,
            color: self.draw_color,
            thickness_pt: RULE_THICKNESS_PT,
        };
        self.current_page().ops.push(op);
    }

    /// Full-width horizontal rule between the margins at height `y`.
    pub fn rule_at(&mut self, y: f32) {
        self.line(MARGIN_MM, y, self.right_edge(), y);
    }

    /// Single-line cell of height `h` spanning to the right margin; the cursor then moves
    /// to the start of the next line. Text that does not fit is not wrapped.
    pub fn cell(&mut self, h: f32, text: &str) {
        self.break_page_if_needed(h);
        if !text.is_empty() {
            self.push_text(self.x, h, text);
        }
        self.ln(h);
    }

    /// Wrapping cell from the current x to the right margin. Each wrapped line takes `h`;
    /// explicit newlines start a new line and empty lines still advance by `h`.
    /// The cursor x is left where the cell started.
    pub fn multi_cell(&mut self, h: f32, text: &str) {
        let start_x = self.x;
        let width = (self.right_edge() - start_x).max(1.0);

        for paragraph in text.split('\n') {
            let lines = metrics().wrap(paragraph, self.font_size_pt, width);
            if lines.is_empty() {
                self.break_page_if_needed(h);
                self.y += h;
                continue;
            }
            for line in lines {
                self.break_page_if_needed(h);
                self.push_text(start_x, h, &line);
                self.y += h;
            }
        }
        self.x = start_x;
    }

    fn push_text(&mut self, x: f32, h: f32, text: &str) {
        // Vertically centre the glyphs in the cell, as PDF writers conventionally do.
        let baseline = self.y + 0.5 * h + 0.3 * self.font_size_pt * MM_PER_PT;
        let op = DrawOp::Text {
            x,
            baseline,
            text: text.to_string(),
            size_pt: self.font_size_pt,
            weight: self.weight,
            color: self.text_color,
        };
        self.current_page().ops.push(op);
    }

    fn break_page_if_needed(&mut self, h: f32) {
        if self.y + h > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM && self.y > MARGIN_MM {
            let x = self.x;
            self.add_page();
            self.x = x;
        }
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}
