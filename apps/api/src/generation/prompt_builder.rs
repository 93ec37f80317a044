//! Prompt Builder: picks the instruction set for (kind, language) and fills it with the
//! request's dossier and job description. Pure; no I/O.

use serde::Serialize;

use crate::errors::AppError;
use crate::generation::prompts::{
    COVER_LETTER_PROMPT_EN, COVER_LETTER_PROMPT_SR, COVER_LETTER_SYSTEM_EN,
    COVER_LETTER_SYSTEM_SR, COVER_LETTER_TEMPERATURE, RESUME_PROMPT_EN, RESUME_PROMPT_SR,
    RESUME_SYSTEM_EN, RESUME_SYSTEM_SR, RESUME_TEMPERATURE,
};
use crate::models::{DocumentKind, GenerationRequest, Language};

/// Everything the model service needs for one completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

struct InstructionSet {
    system: &'static str,
    template: &'static str,
    temperature: f32,
}

fn instruction_set(kind: DocumentKind, language: Language) -> InstructionSet {
    match (kind, language) {
        (DocumentKind::Resume, Language::Serbian) => InstructionSet {
            system: RESUME_SYSTEM_SR,
            template: RESUME_PROMPT_SR,
            temperature: RESUME_TEMPERATURE,
        },
        (DocumentKind::Resume, Language::English) => InstructionSet {
            system: RESUME_SYSTEM_EN,
            template: RESUME_PROMPT_EN,
            temperature: RESUME_TEMPERATURE,
        },
        (DocumentKind::CoverLetter, Language::Serbian) => InstructionSet {
            system: COVER_LETTER_SYSTEM_SR,
            template: COVER_LETTER_PROMPT_SR,
            temperature: COVER_LETTER_TEMPERATURE,
        },
        (DocumentKind::CoverLetter, Language::English) => InstructionSet {
            system: COVER_LETTER_SYSTEM_EN,
            template: COVER_LETTER_PROMPT_EN,
            temperature: COVER_LETTER_TEMPERATURE,
        },
    }
}

/// Builds the system instructions and user prompt for a generation request.
pub fn build_prompt(request: &GenerationRequest) -> Result<PromptPair, AppError> {
    let set = instruction_set(request.kind, request.language);

    let dossier_json = request
        .profile
        .to_prompt_json()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize dossier: {e}")))?;

    let user = fill_template(
        set.template,
        &[
            ("{dossier_json}", &dossier_json),
            ("{job_description}", &request.job_description),
        ],
    );

    Ok(PromptPair {
        system: set.system.to_string(),
        user,
        temperature: set.temperature,
    })
}

/// Substitutes placeholders in one left-to-right pass, so substituted values are never
/// scanned for further placeholders.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|(key, value)| rest.find(key).map(|pos| (pos, *key, *value)))
            .min_by_key(|(pos, _, _)| *pos);

        match next {
            Some((pos, key, value)) => {
                out.push_str(&rest[..pos]);
                out.push_str(value);
                rest = &rest[pos + key.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
