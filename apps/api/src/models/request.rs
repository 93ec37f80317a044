use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::profile::Profile;
use crate::sanitize::sanitize;

/// Output locale. Serbian is the primary language, English the secondary one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "sr")]
    Serbian,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Serbian => "sr",
            Language::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sr" => Ok(Language::Serbian),
            "en" => Ok(Language::English),
            other => Err(format!("unsupported language '{other}' (expected 'sr' or 'en')")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    /// Prefix of the transient artifact written to disk.
    pub fn artifact_prefix(self) -> &'static str {
        match self {
            DocumentKind::Resume => "CVespresso",
            DocumentKind::CoverLetter => "CoverLetter",
        }
    }

    /// Filename offered to the client in `content-disposition`.
    pub fn download_name(self, language: Language) -> String {
        match self {
            DocumentKind::Resume => format!("CVespresso_{language}.pdf"),
            DocumentKind::CoverLetter => format!("Cover_Letter_{language}.pdf"),
        }
    }
}

/// One generation call. Built once per request and never mutated.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub job_description: String,
    pub profile: Profile,
    pub language: Language,
    pub kind: DocumentKind,
}

impl GenerationRequest {
    /// Builds a request from untrusted wire data, sanitizing the job description and dossier.
    pub fn from_untrusted(
        job_description: &str,
        dossier: Option<serde_json::Value>,
        language: Language,
        kind: DocumentKind,
    ) -> Self {
        Self {
            job_description: sanitize(job_description),
            profile: Profile::from_untrusted(dossier),
            language,
            kind,
        }
    }
}
