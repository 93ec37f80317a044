//! Identity block drawn at the top of every generated document.
//!
//! The model is told never to write contact details; they come from the profile and are
//! rendered here so résumé and cover letter share one header.

use crate::layout::style::{HeaderStyle, TextSpec};
use crate::models::Profile;
use crate::render::Document;

const SEPARATOR: &str = " | ";

/// `email | phone | location`, skipping absent or empty fields. `None` if nothing is left.
pub fn contact_line(profile: &Profile) -> Option<String> {
    join_present(
        [&profile.email, &profile.phone, &profile.location]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
    )
}

/// `LinkedIn: … | GitHub: … | Web: …` with scheme and trailing slash removed.
pub fn links_line(profile: &Profile) -> Option<String> {
    let links = [
        ("LinkedIn", &profile.linkedin),
        ("GitHub", &profile.github),
        ("Web", &profile.website),
    ];
    join_present(links.into_iter().filter_map(|(label, url)| {
        let cleaned = clean_link(url.as_deref()?);
        (!cleaned.is_empty()).then(|| format!("{label}: {cleaned}"))
    }))
}

/// Strips a leading `https://`/`http://` and any trailing `/`.
pub fn clean_link(url: &str) -> &str {
    let url = url.trim();
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    url.trim_end_matches('/')
}

fn join_present(parts: impl Iterator<Item = String>) -> Option<String> {
    let parts: Vec<String> = parts.collect();
    (!parts.is_empty()).then(|| parts.join(SEPARATOR))
}

/// Draws name, contact line, links line and a separator rule, then resets the text style
/// to `body`. Lines with no fields are skipped entirely.
pub fn render_header(doc: &mut Document, profile: &Profile, style: &HeaderStyle, body: &TextSpec) {
    apply(doc, &style.name);
    doc.cell(style.name_height_mm, profile.display_name());

    apply(doc, &style.detail);
    if let Some(line) = contact_line(profile) {
        doc.cell(style.detail_height_mm, &line);
    }
    if let Some(line) = links_line(profile) {
        doc.cell(style.detail_height_mm, &line);
    }

    doc.set_draw_color(style.rule_color);
    let rule_y = doc.y() + style.rule_offset_mm;
    doc.rule_at(rule_y);
    doc.ln(style.gap_after_mm);

    apply(doc, body);
}

fn apply(doc: &mut Document, spec: &TextSpec) {
    doc.set_font(spec.size_pt, spec.weight);
    doc.set_text_color(spec.color);
}
