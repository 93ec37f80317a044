use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sanitize::sanitize_tree;

/// Name drawn in the header when the profile carries none.
pub const PLACEHOLDER_NAME: &str = "CVespresso User";

/// Candidate dossier.
///
/// Known attributes are typed; anything else the caller sends is kept in `extra` and
/// passed through to the prompt untouched. Construct through [`Profile::from_untrusted`]
/// so every string leaf is sanitized before use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Free narrative or a structured list of work entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Value>,
    #[serde(default)]
    pub projects: Vec<Value>,
    #[serde(default)]
    pub certifications: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Anonymized stand-in used when the caller sends no dossier.
    pub fn anonymous() -> Self {
        Self {
            full_name: Some("Korisnik Aplikacije".to_string()),
            title: Some("Profesionalac".to_string()),
            experience: Some(Value::String(
                "Primer radnog iskustva koji AI treba da prilagodi.".to_string(),
            )),
            ..Self::default()
        }
    }

    /// Sanitizes a raw caller-supplied dossier and lifts it into a `Profile`.
    ///
    /// Never fails: a missing dossier becomes [`Profile::anonymous`], and known fields with
    /// an unexpected shape are coerced or dropped instead of rejecting the request.
    pub fn from_untrusted(raw: Option<Value>) -> Self {
        let Some(raw) = raw else {
            return Self::anonymous();
        };

        match sanitize_tree(raw) {
            Value::Object(mut map) => {
                let mut profile = Self {
                    full_name: take_text(&mut map, "full_name"),
                    title: take_text(&mut map, "title"),
                    email: take_text(&mut map, "email"),
                    phone: take_text(&mut map, "phone"),
                    location: take_text(&mut map, "location"),
                    linkedin: take_text(&mut map, "linkedin"),
                    github: take_text(&mut map, "github"),
                    website: take_text(&mut map, "website"),
                    experience: map.remove("experience").filter(|v| !v.is_null()),
                    projects: take_list(&mut map, "projects"),
                    certifications: take_list(&mut map, "certifications"),
                    extra: Map::new(),
                };
                profile.extra = map;
                profile
            }
            Value::Null => Self::anonymous(),
            other => {
                tracing::warn!("Dossier is not a JSON object; passing it through as narrative");
                Self {
                    experience: Some(other),
                    ..Self::default()
                }
            }
        }
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(PLACEHOLDER_NAME)
    }

    /// Serialized form embedded in prompts. Non-ASCII letters are kept as-is.
    pub fn to_prompt_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Pulls a scalar field out as text; numbers (e.g. a phone sent as a number) are stringified.
fn take_text(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => {
            map.insert(key.to_string(), other);
            None
        }
    }
}

fn take_list(map: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match map.remove(key) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single],
    }
}
