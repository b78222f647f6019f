//! Field formatters for character cards.
//!
//! Every function here is total: malformed or missing input yields a fixed
//! pt-BR fallback, never an error.

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime};

use super::record::Phrases;

/// Fallback for any missing detail value.
pub const NOT_INFORMED: &str = "Não informado";
/// Status text when the API gives none.
pub const UNKNOWN_STATUS: &str = "Desconhecido";

/// Quotes longer than this are only used when nothing shorter exists.
pub const MAX_PREFERRED_QUOTE_CHARS: usize = 120;

/// Coarse status classification used to pick a display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Alive,
    Deceased,
    Unknown,
}

impl StatusCategory {
    /// Classify a raw status value.
    pub fn classify(status: Option<&str>) -> Self {
        match status.map(normalize).as_deref() {
            Some("alive") => Self::Alive,
            Some("deceased") => Self::Deceased,
            _ => Self::Unknown,
        }
    }
}

/// Localized status text plus its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedStatus {
    pub text: String,
    pub category: StatusCategory,
}

/// `"<n> anos"` for a finite number, else [`NOT_INFORMED`].
pub fn format_age(age: Option<f64>) -> String {
    match age {
        Some(n) if n.is_finite() => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{} anos", n as i64)
            } else {
                format!("{n} anos")
            }
        }
        _ => NOT_INFORMED.to_string(),
    }
}

/// Long pt-BR date (`"12 de maio de 1956"`) when the value parses as a date.
pub fn format_birthdate(birthdate: Option<&str>) -> String {
    birthdate
        .and_then(parse_calendar_date)
        .map(|date| date.format_localized("%d de %B de %Y", Locale::pt_BR).to_string())
        .unwrap_or_else(|| NOT_INFORMED.to_string())
}

/// Non-blank occupation verbatim, else [`NOT_INFORMED`].
pub fn format_occupation(occupation: Option<&str>) -> String {
    match occupation {
        Some(o) if !o.trim().is_empty() => o.to_string(),
        _ => NOT_INFORMED.to_string(),
    }
}

/// Map known English/Portuguese gender values to pt-BR labels.
pub fn format_gender(gender: Option<&str>) -> String {
    let Some(raw) = gender.map(str::trim).filter(|g| !g.is_empty()) else {
        return NOT_INFORMED.to_string();
    };

    match raw.to_lowercase().as_str() {
        "male" | "homem" => "Homem".to_string(),
        "female" | "woman" | "mulher" => "Mulher".to_string(),
        _ => capitalize_first(raw),
    }
}

/// Localized status with grammatical agreement on the character's gender.
pub fn format_status(status: Option<&str>, gender: Option<&str>) -> FormattedStatus {
    let Some(raw) = status.map(str::trim).filter(|s| !s.is_empty()) else {
        return FormattedStatus {
            text: UNKNOWN_STATUS.to_string(),
            category: StatusCategory::Unknown,
        };
    };

    let female = is_female_gender(gender);
    let category = StatusCategory::classify(Some(raw));
    let text = match category {
        StatusCategory::Alive => capitalize_first(if female { "viva" } else { "vivo" }),
        StatusCategory::Deceased => capitalize_first(if female { "morta" } else { "morto" }),
        StatusCategory::Unknown => capitalize_first(raw),
    };

    FormattedStatus { text, category }
}

/// Pick the quote shown on a card.
///
/// A single phrase is used verbatim. From a list, the first phrase of at most
/// [`MAX_PREFERRED_QUOTE_CHARS`] characters wins; otherwise the first phrase.
pub fn select_quote(phrases: Option<&Phrases>) -> Option<&str> {
    match phrases? {
        Phrases::One(text) => Some(text.as_str()),
        Phrases::Many(items) => items
            .iter()
            .find(|p| p.chars().count() <= MAX_PREFERRED_QUOTE_CHARS)
            .or_else(|| items.first())
            .map(String::as_str),
    }
}

/// Grammatical-agreement helper.
///
/// Only `female`, `mulher` and `feminino` count as feminine; everything else,
/// including absence, takes the masculine form. Non-binary forms are not
/// modelled.
pub fn is_female_gender(gender: Option<&str>) -> bool {
    matches!(
        gender.map(normalize).as_deref(),
        Some("female" | "mulher" | "feminino")
    )
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    for fmt in ["%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    None
}
