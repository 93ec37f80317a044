//! Line classifier: decides the visual treatment of each line of model output.
//!
//! Pure functions only: nothing here touches a document, so every rule can be tested on
//! plain strings.
//!
//! # Precedence (first match wins)
//! 1. empty after trimming → `Blank`
//! 2. contains a section keyword (uppercased) and is shorter than 30 chars → `SectionHeader`
//! 3. contains `|` and no bullet glyph → `JobSubheading`
//! 4. starts with `•` or `-` → `Bullet`
//! 5. anything else → `BodyText`

use crate::models::DocumentKind;

pub const BULLET_GLYPH: char = '•';

/// Lines at or above this many characters are never headers, even if they contain a keyword.
pub const HEADER_MAX_CHARS: usize = 30;

/// Résumé section titles in both supported languages, uppercased.
pub const RESUME_SECTION_KEYWORDS: &[&str] = &[
    "PROFESIONALNI REZIME",
    "VEŠTINE",
    "RADNO ISKUSTVO",
    "OBRAZOVANJE",
    "SERTIFIKATI",
    "PROFESSIONAL SUMMARY",
    "SKILLS",
    "WORK EXPERIENCE",
    "EDUCATION",
    "CERTIFICATIONS",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClass {
    SectionHeader,
    JobSubheading,
    Bullet,
    BodyText,
    Blank,
}

/// One line of model output after normalization, tagged with its class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub class: LineClass,
    pub text: String,
}

/// Section keywords recognized for a document kind. Cover letters have none.
pub fn section_keywords(kind: DocumentKind) -> &'static [&'static str] {
    match kind {
        DocumentKind::Resume => RESUME_SECTION_KEYWORDS,
        DocumentKind::CoverLetter => &[],
    }
}

/// Removes markdown noise the model tends to emit: `#` headings, `**` bold markers, and
/// `* ` list markers (rewritten to the bullet glyph).
pub fn normalize_text(raw: &str) -> String {
    raw.replace('#', "")
        .replace("**", "")
        .replace("* ", "• ")
}

/// Classifies a single already-normalized line.
pub fn classify_line(line: &str, keywords: &[&str]) -> RenderedLine {
    let line = line.trim();

    if line.is_empty() {
        return RenderedLine {
            class: LineClass::Blank,
            text: String::new(),
        };
    }

    let upper = line.to_uppercase();
    if line.chars().count() < HEADER_MAX_CHARS && keywords.iter().any(|k| upper.contains(k)) {
        return RenderedLine {
            class: LineClass::SectionHeader,
            text: upper,
        };
    }

    let class = if line.contains('|') && !line.contains(BULLET_GLYPH) {
        LineClass::JobSubheading
    } else if line.starts_with(BULLET_GLYPH) || line.starts_with('-') {
        LineClass::Bullet
    } else {
        LineClass::BodyText
    };

    RenderedLine {
        class,
        text: line.to_string(),
    }
}

/// Normalizes raw model output and classifies every line, preserving order.
pub fn classify_text(raw: &str, keywords: &[&str]) -> Vec<RenderedLine> {
    normalize_text(raw)
        .split('\n')
        .map(|line| classify_line(line, keywords))
        .collect()
}
