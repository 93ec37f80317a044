//! Visual treatment per line class. Pure data.
//!
//! The classifier decides *what* a line is; the stylesheet decides how it looks. Presets
//! live here, and a JSON file can override any subset of them at startup (see
//! [`StyleSheets::load`]) without touching classification.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::layout::classifier::LineClass;
use crate::models::DocumentKind;
use crate::render::{FontWeight, Rgb};

/// Layout primitive a block is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// One fixed-height line; overlong text is not wrapped.
    Cell,
    /// Word-wrapped lines of `line_height_mm` each.
    MultiCell,
}

/// Font and color for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub size_pt: f32,
    pub weight: FontWeight,
    pub color: Rgb,
}

/// Full treatment for one line class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockStyle {
    pub text: TextSpec,
    pub primitive: Primitive,
    pub line_height_mm: f32,
    /// Extra left indent relative to the page margin.
    pub indent_mm: f32,
    pub gap_before_mm: f32,
    pub gap_after_mm: f32,
    /// Full-width rule drawn right under the block, in this color.
    pub rule: Option<Rgb>,
}

/// Identity block drawn at the top of every document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderStyle {
    pub name: TextSpec,
    pub name_height_mm: f32,
    pub detail: TextSpec,
    pub detail_height_mm: f32,
    pub rule_color: Rgb,
    /// Distance from the cursor to the rule under the header.
    pub rule_offset_mm: f32,
    pub gap_after_mm: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub header: HeaderStyle,
    /// Style restored after the header is drawn.
    pub body_default: TextSpec,
    pub section_header: BlockStyle,
    pub job_subheading: BlockStyle,
    pub bullet: BlockStyle,
    pub body_text: BlockStyle,
    /// Vertical gap emitted for a blank line.
    pub blank_spacer_mm: f32,
}

const BLACK: Rgb = Rgb(0, 0, 0);
const BODY_GREY: Rgb = Rgb(50, 50, 50);
const RULE_GREY: Rgb = Rgb(100, 100, 100);

impl StyleSheet {
    pub fn resume() -> Self {
        Self {
            header: HeaderStyle {
                name: TextSpec {
                    size_pt: 20.0,
                    weight: FontWeight::Bold,
                    color: Rgb(26, 28, 30),
                },
                name_height_mm: 10.0,
                detail: TextSpec {
                    size_pt: 9.0,
                    weight: FontWeight::Regular,
                    color: Rgb(100, 100, 100),
                },
                detail_height_mm: 5.0,
                rule_color: Rgb(200, 200, 200),
                rule_offset_mm: 3.0,
                gap_after_mm: 8.0,
            },
            body_default: TextSpec {
                size_pt: 11.0,
                weight: FontWeight::Regular,
                color: BLACK,
            },
            section_header: BlockStyle {
                text: TextSpec {
                    size_pt: 11.0,
                    weight: FontWeight::Bold,
                    color: BLACK,
                },
                primitive: Primitive::Cell,
                line_height_mm: 6.0,
                indent_mm: 0.0,
                gap_before_mm: 6.0,
                gap_after_mm: 3.0,
                rule: Some(RULE_GREY),
            },
            job_subheading: BlockStyle {
                text: TextSpec {
                    size_pt: 10.0,
                    weight: FontWeight::Bold,
                    color: BLACK,
                },
                primitive: Primitive::Cell,
                line_height_mm: 7.0,
                indent_mm: 0.0,
                gap_before_mm: 0.0,
                gap_after_mm: 0.0,
                rule: None,
            },
            bullet: BlockStyle {
                text: TextSpec {
                    size_pt: 9.0,
                    weight: FontWeight::Regular,
                    color: BODY_GREY,
                },
                primitive: Primitive::MultiCell,
                line_height_mm: 5.0,
                indent_mm: 4.0,
                gap_before_mm: 0.0,
                gap_after_mm: 0.0,
                rule: None,
            },
            body_text: BlockStyle {
                text: TextSpec {
                    size_pt: 9.0,
                    weight: FontWeight::Regular,
                    color: BODY_GREY,
                },
                primitive: Primitive::MultiCell,
                line_height_mm: 5.0,
                indent_mm: 0.0,
                gap_before_mm: 0.0,
                gap_after_mm: 0.0,
                rule: None,
            },
            blank_spacer_mm: 2.0,
        }
    }

    /// Letters read as continuous prose: larger black body text on a taller line.
    pub fn cover_letter() -> Self {
        let prose = BlockStyle {
            text: TextSpec {
                size_pt: 11.0,
                weight: FontWeight::Regular,
                color: BLACK,
            },
            primitive: Primitive::MultiCell,
            line_height_mm: 7.0,
            indent_mm: 0.0,
            gap_before_mm: 0.0,
            gap_after_mm: 0.0,
            rule: None,
        };
        Self {
            job_subheading: prose,
            bullet: BlockStyle {
                indent_mm: 4.0,
                ..prose
            },
            body_text: prose,
            blank_spacer_mm: 7.0,
            ..Self::resume()
        }
    }

    /// Block style for a drawable class; `None` for blank lines.
    pub fn block(&self, class: LineClass) -> Option<&BlockStyle> {
        match class {
            LineClass::SectionHeader => Some(&self.section_header),
            LineClass::JobSubheading => Some(&self.job_subheading),
            LineClass::Bullet => Some(&self.bullet),
            LineClass::BodyText => Some(&self.body_text),
            LineClass::Blank => None,
        }
    }
}

/// Stylesheets for every document kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheets {
    pub resume: StyleSheet,
    pub cover_letter: StyleSheet,
}

impl Default for StyleSheets {
    fn default() -> Self {
        Self {
            resume: StyleSheet::resume(),
            cover_letter: StyleSheet::cover_letter(),
        }
    }
}

impl StyleSheets {
    pub fn for_kind(&self, kind: DocumentKind) -> &StyleSheet {
        match kind {
            DocumentKind::Resume => &self.resume,
            DocumentKind::CoverLetter => &self.cover_letter,
        }
    }

    /// Presets, optionally patched by a JSON override file.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let Some(path) = override_path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stylesheet override {}", path.display()))?;
        let patch: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Stylesheet override {} is not valid JSON", path.display()))?;
        Self::with_overrides(patch)
    }

    /// Deep-merges `patch` over the presets. Only the keys present in `patch` change.
    pub fn with_overrides(patch: Value) -> Result<Self> {
        let mut base =
            serde_json::to_value(Self::default()).context("Failed to serialize style presets")?;
        merge_json(&mut base, patch);
        serde_json::from_value(base).context("Stylesheet override has an invalid shape")
    }
}

fn merge_json(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bullet_indent_differs_from_body() {
        let sheet = StyleSheet::resume();
        assert!(sheet.bullet.indent_mm > sheet.body_text.indent_mm);
    }

    #[test]
    fn test_only_section_headers_carry_a_rule() {
        let sheet = StyleSheet::resume();
        assert!(sheet.section_header.rule.is_some());
        assert!(sheet.job_subheading.rule.is_none());
        assert!(sheet.bullet.rule.is_none());
        assert!(sheet.body_text.rule.is_none());
    }

    #[test]
    fn test_blank_has_no_block_style() {
        assert!(StyleSheet::resume().block(LineClass::Blank).is_none());
        assert!(StyleSheet::resume().block(LineClass::Bullet).is_some());
    }

    #[test]
    fn test_partial_override_keeps_other_presets() {
        let sheets = StyleSheets::with_overrides(json!({
            "resume": {"bullet": {"indent_mm": 6.5, "text": {"color": [10, 20, 30]}}}
        }))
        .unwrap();
        assert_eq!(sheets.resume.bullet.indent_mm, 6.5);
        assert_eq!(sheets.resume.bullet.text.color, Rgb(10, 20, 30));
        assert_eq!(sheets.resume.bullet.text.size_pt, 9.0);
        assert_eq!(sheets.resume.body_text, StyleSheet::resume().body_text);
        assert_eq!(sheets.cover_letter, StyleSheet::cover_letter());
    }

    #[test]
    fn test_override_can_remove_rule() {
        let sheets =
            StyleSheets::with_overrides(json!({"resume": {"section_header": {"rule": null}}}))
                .unwrap();
        assert!(sheets.resume.section_header.rule.is_none());
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let result = StyleSheets::with_overrides(json!({"resume": {"bullet": {"primitive": "zigzag"}}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_without_path_returns_presets() {
        assert_eq!(StyleSheets::load(None).unwrap(), StyleSheets::default());
    }

    #[test]
    fn test_load_reads_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.json");
        std::fs::write(&path, r#"{"cover_letter": {"blank_spacer_mm": 3}}"#).unwrap();
        let sheets = StyleSheets::load(Some(&path)).unwrap();
        assert_eq!(sheets.cover_letter.blank_spacer_mm, 3.0);
    }
}
