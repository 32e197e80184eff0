use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for the translation boundary
///
/// The translation endpoint speaks ISO 639-1 (2-letter) codes, so every
/// user-supplied language identifier (2-letter code, 3-letter code, or an
/// English language name) is normalized down to 639-1 here. The literal
/// "auto" passes through untouched: it is the endpoint's own wildcard.
/// Normalize a user-supplied language identifier to an ISO 639-1 code
pub fn normalize_language(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("auto") {
        return Ok("auto".to_string());
    }

    let lowercase = trimmed.to_lowercase();
    let language = match lowercase.len() {
        2 => Language::from_639_1(&lowercase),
        3 => Language::from_639_3(&lowercase),
        _ => Language::from_name(trimmed),
    };

    language
        .and_then(|lang| lang.to_639_1())
        .map(|code| code.to_string())
        .ok_or_else(|| anyhow!("invalid language: {}", input))
}

/// Check whether a filename component is a valid translation-language
/// suffix (used to recognize `movie.pt.srt` style names)
pub fn is_language_suffix(component: &str) -> bool {
    !component.eq_ignore_ascii_case("auto") && normalize_language(component).is_ok()
}

/// English display name of a language identifier, for log output
pub fn language_name(code: &str) -> Result<String> {
    let normalized = normalize_language(code)?;
    if normalized == "auto" {
        return Ok("auto-detected".to_string());
    }
    Language::from_639_1(&normalized)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("unknown language code: {}", code))
}
