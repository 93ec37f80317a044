//! Layout engine: turns classified lines into draw calls on a [`Document`].
//!
//! The engine renders exactly the lines it receives. It never reorders, drops, or invents
//! content; whether the model listed every job is the prompt's concern, not ours.

use crate::layout::classifier::{classify_text, LineClass, RenderedLine};
use crate::layout::style::{BlockStyle, Primitive, StyleSheet};
use crate::render::Document;

/// Per-class line counts of a finished layout, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub section_headers: usize,
    pub job_subheadings: usize,
    pub bullets: usize,
    pub body_lines: usize,
    pub blanks: usize,
}

impl LayoutStats {
    fn record(&mut self, class: LineClass) {
        match class {
            LineClass::SectionHeader => self.section_headers += 1,
            LineClass::JobSubheading => self.job_subheadings += 1,
            LineClass::Bullet => self.bullets += 1,
            LineClass::BodyText => self.body_lines += 1,
            LineClass::Blank => self.blanks += 1,
        }
    }
}

/// Classifies `raw` line by line and draws it below the current cursor.
pub fn render_body(
    doc: &mut Document,
    raw: &str,
    keywords: &[&str],
    styles: &StyleSheet,
) -> LayoutStats {
    let mut stats = LayoutStats::default();
    for line in classify_text(raw, keywords) {
        stats.record(line.class);
        render_line(doc, &line, styles);
    }
    stats
}

/// Draws one classified line.
pub fn render_line(doc: &mut Document, line: &RenderedLine, styles: &StyleSheet) {
    match styles.block(line.class) {
        Some(style) => draw_block(doc, style, &line.text),
        None => doc.ln(styles.blank_spacer_mm),
    }
}

fn draw_block(doc: &mut Document, style: &BlockStyle, text: &str) {
    if style.gap_before_mm > 0.0 {
        doc.ln(style.gap_before_mm);
    }

    doc.set_font(style.text.size_pt, style.text.weight);
    doc.set_text_color(style.text.color);

    let left = doc.left_margin();
    doc.set_x(left + style.indent_mm);
    match style.primitive {
        Primitive::Cell => doc.cell(style.line_height_mm, text),
        Primitive::MultiCell => doc.multi_cell(style.line_height_mm, text),
    }
    doc.set_x(left);

    if let Some(color) = style.rule {
        doc.set_draw_color(color);
        let y = doc.y();
        doc.rule_at(y);
    }

    if style.gap_after_mm > 0.0 {
        doc.ln(style.gap_after_mm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::classifier::RESUME_SECTION_KEYWORDS;
    use crate::render::document::MARGIN_MM;
    use crate::render::{DrawOp, Rgb};

    fn render(raw: &str) -> (Document, LayoutStats) {
        let mut doc = Document::new();
        let stats = render_body(&mut doc, raw, RESUME_SECTION_KEYWORDS, &StyleSheet::resume());
        (doc, stats)
    }

    fn text_ops(doc: &Document) -> Vec<(f32, String, f32)> {
        doc.ops()
            .filter_map(|op| match op {
                DrawOp::Text {
                    x, text, size_pt, ..
                } => Some((*x, text.clone(), *size_pt)),
                DrawOp::Rule { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_section_header_draws_uppercase_text_and_rule() {
        let (doc, stats) = render("Skills");
        assert_eq!(stats.section_headers, 1);
        let ops: Vec<&DrawOp> = doc.ops().collect();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], DrawOp::Text { text, .. } if text == "SKILLS"));
        match ops[1] {
            DrawOp::Rule {
                x1, x2, y1, color, ..
            } => {
                assert_eq!(*x1, MARGIN_MM);
                assert_eq!(*x2, doc.right_edge());
                // 6mm gap + 6mm cell below the top margin
                assert_eq!(*y1, MARGIN_MM + 12.0);
                assert_eq!(*color, Rgb(100, 100, 100));
            }
            other => panic!("expected rule, got {other:?}"),
        }
        assert_eq!(doc.y(), MARGIN_MM + 15.0);
    }

    #[test]
    fn test_bullet_is_indented_relative_to_body() {
        let (doc, stats) = render("• Led migration of core services\nRust, Go, SQL");
        assert_eq!(stats.bullets, 1);
        assert_eq!(stats.body_lines, 1);
        let ops = text_ops(&doc);
        let bullet_x = ops[0].0;
        let body_x = ops[1].0;
        assert_eq!(body_x, MARGIN_MM);
        assert_eq!(bullet_x, MARGIN_MM + 4.0);
        assert_ne!(bullet_x, body_x);
        // margin is restored after the bullet
        assert_eq!(doc.x(), MARGIN_MM);
    }

    #[test]
    fn test_job_subheading_uses_single_cell_without_rule() {
        let (doc, stats) = render("Backend Engineer | Acme Corp | 2019-2022");
        assert_eq!(stats.job_subheadings, 1);
        let ops: Vec<&DrawOp> = doc.ops().collect();
        assert_eq!(ops.len(), 1);
        assert!(matches!(ops[0], DrawOp::Text { size_pt, .. } if *size_pt == 10.0));
        assert_eq!(doc.y(), MARGIN_MM + 7.0);
    }

    #[test]
    fn test_blank_lines_only_add_space() {
        let (doc, stats) = render("\n\n   \n");
        assert_eq!(stats.blanks, 4);
        assert_eq!(doc.ops().count(), 0);
        assert_eq!(doc.y(), MARGIN_MM + 8.0);
    }

    #[test]
    fn test_long_body_text_wraps() {
        let paragraph = "Seasoned backend engineer who designs fault-tolerant services, mentors \
                         teammates, and keeps production calm under heavy load across regions.";
        let (doc, stats) = render(&paragraph.repeat(2));
        assert_eq!(stats.body_lines, 1);
        assert!(text_ops(&doc).len() > 1);
    }

    #[test]
    fn test_renders_exactly_the_lines_received() {
        let raw = "WORK EXPERIENCE\n\
                   Engineer | A | 2022\n\
                   • Did one thing\n\
                   Engineer | B | 2020\n\
                   Intern | C | 2018";
        let (doc, stats) = render(raw);
        assert_eq!(
            stats,
            LayoutStats {
                section_headers: 1,
                job_subheadings: 3,
                bullets: 1,
                body_lines: 0,
                blanks: 0,
            }
        );
        assert_eq!(text_ops(&doc).len(), 5);
    }

    #[test]
    fn test_unstructured_output_still_renders() {
        let (doc, stats) = render("Just a paragraph the model wrote instead of the template.");
        assert_eq!(stats.body_lines, 1);
        assert_eq!(text_ops(&doc).len(), 1);
    }
}
