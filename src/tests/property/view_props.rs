//! Property-based tests for record decoding and card formatting
//!
//! Tests invariants:
//! - Decoding never fails, whatever the JSON shape
//! - Names pass through as given; every formatted field is non-empty
//! - Portrait URLs carry the CDN base and the requested size
//! - Quote selection prefers the first phrase of at most 120 characters

use proptest::prelude::*;
use serde_json::Value;

use crate::core::characters::format::{
    format_age, format_status, select_quote, MAX_PREFERRED_QUOTE_CHARS, NOT_INFORMED,
};
use crate::core::characters::view::{GENERIC_CAPTION, UNKNOWN_CHARACTER};
use crate::core::characters::{CharacterRecord, CharacterView, Phrases, PortraitUrls, StatusCategory};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Generate an arbitrary JSON value, nested up to three levels.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        ".{0,40}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::hash_map("[a-z_]{1,12}", inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

/// Generate a record-shaped object whose known fields hold arbitrary values.
fn arb_record_value() -> impl Strategy<Value = Value> {
    let field = prop_oneof![
        Just("id"),
        Just("name"),
        Just("age"),
        Just("birthdate"),
        Just("gender"),
        Just("occupation"),
        Just("status"),
        Just("portrait_path"),
        Just("phrases"),
    ];
    prop::collection::vec((field, arb_json()), 0..9).prop_map(|fields| {
        Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    })
}

/// Generate a list of phrases with a mix of short and long entries.
fn arb_phrases() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof!["[a-zA-Z !]{0,60}", "[a-zA-Z ]{121,200}", "[á-ú]{100,140}"],
        0..6,
    )
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Any JSON value decodes to a record and a complete view
    #[test]
    fn prop_view_construction_is_total(value in prop_oneof![arb_json(), arb_record_value()]) {
        let record = CharacterRecord::from_value(value);
        let view = CharacterView::from_record(&record, &PortraitUrls::default());

        let name = record.name.clone();
        prop_assert_eq!(&view.display_name, &name.clone().unwrap_or_else(|| UNKNOWN_CHARACTER.to_string()));
        prop_assert_eq!(&view.caption, &name.unwrap_or_else(|| GENERIC_CAPTION.to_string()));
        prop_assert!(!view.age.is_empty());
        prop_assert!(!view.birthdate.is_empty());
        prop_assert!(!view.gender.is_empty());
        prop_assert!(!view.occupation.is_empty());
        prop_assert!(!view.status.text.is_empty());
        prop_assert!(!view.quote.is_empty());
        prop_assert_eq!(view.detail_rows().len(), 5);
    }

    /// Property: Portrait URLs are never empty and carry size and CDN base
    #[test]
    fn prop_portrait_urls_are_well_formed(value in arb_record_value()) {
        let record = CharacterRecord::from_value(value);
        let view = CharacterView::from_record(&record, &PortraitUrls::default());

        prop_assert!(view.image_url.starts_with("https://cdn.thesimpsonsapi.com/500/"));
        prop_assert!(view.full_image_url.starts_with("https://cdn.thesimpsonsapi.com/1280/"));
    }

    /// Property: The chosen quote is the first short phrase, else the first
    #[test]
    fn prop_quote_prefers_first_short_phrase(items in arb_phrases()) {
        let phrases = Phrases::Many(items.clone());
        let chosen = select_quote(Some(&phrases));

        let expected = items
            .iter()
            .find(|p| p.chars().count() <= MAX_PREFERRED_QUOTE_CHARS)
            .or(items.first())
            .map(String::as_str);
        prop_assert_eq!(chosen, expected);
    }

    /// Property: Any finite age renders in years; non-finite is not informed
    #[test]
    fn prop_age_formatting(age in any::<f64>()) {
        let formatted = format_age(Some(age));
        if age.is_finite() {
            prop_assert!(formatted.ends_with(" anos"), "unexpected: {}", formatted);
        } else {
            prop_assert_eq!(formatted, NOT_INFORMED);
        }
    }

    /// Property: Status text agrees with its category
    #[test]
    fn prop_status_text_matches_category(
        status in prop::option::of("[a-zA-Z ]{0,12}|alive|Alive|DECEASED|deceased"),
        gender in prop::option::of("male|female|Mulher|feminino|[a-z]{0,8}"),
    ) {
        let formatted = format_status(status.as_deref(), gender.as_deref());
        prop_assert!(!formatted.text.is_empty());
        match formatted.category {
            StatusCategory::Alive => {
                prop_assert!(formatted.text == "Vivo" || formatted.text == "Viva")
            }
            StatusCategory::Deceased => {
                prop_assert!(formatted.text == "Morto" || formatted.text == "Morta")
            }
            StatusCategory::Unknown => {
                let normalized = status.as_deref().map(|s| s.trim().to_lowercase());
                prop_assert!(!matches!(normalized.as_deref(), Some("alive" | "deceased")));
            }
        }
    }
}
