//! Presentation-ready character view model.

use super::format::{
    format_age, format_birthdate, format_gender, format_occupation, format_status, select_quote,
    FormattedStatus, StatusCategory,
};
use super::portrait::{PortraitUrls, CARD_PORTRAIT_SIZE, MODAL_PORTRAIT_SIZE};
use super::record::CharacterRecord;

/// Heading used when a record has no name.
pub const UNKNOWN_CHARACTER: &str = "Personagem Desconhecido";
/// Caption/alt text used when a record has no name.
pub const GENERIC_CAPTION: &str = "Personagem de Os Simpsons";
/// Quote line used when no phrase is available.
pub const NO_QUOTES: &str = "Sem citações disponíveis.";

/// Fully-defaulted projection of one [`CharacterRecord`].
///
/// Construction is total and depends on nothing but the record and the CDN
/// base. Views are rebuilt on every render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterView {
    pub display_name: String,
    pub caption: String,
    /// Card-sized portrait URL (never empty).
    pub image_url: String,
    /// Modal-sized portrait URL (never empty).
    pub full_image_url: String,
    pub age: String,
    pub birthdate: String,
    pub gender: String,
    pub occupation: String,
    pub status: FormattedStatus,
    pub quote: String,
}

/// One labelled row of the card's detail list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRow<'a> {
    pub label: &'static str,
    pub value: &'a str,
    /// Only set on the status row.
    pub category: Option<StatusCategory>,
}

impl CharacterView {
    pub fn from_record(record: &CharacterRecord, urls: &PortraitUrls) -> Self {
        let portrait = record.portrait_path.as_deref();
        Self {
            display_name: record
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_CHARACTER.to_string()),
            caption: record
                .name
                .clone()
                .unwrap_or_else(|| GENERIC_CAPTION.to_string()),
            image_url: urls.build(portrait, CARD_PORTRAIT_SIZE),
            full_image_url: urls.build(portrait, MODAL_PORTRAIT_SIZE),
            age: format_age(record.age),
            birthdate: format_birthdate(record.birthdate.as_deref()),
            gender: format_gender(record.gender.as_deref()),
            occupation: format_occupation(record.occupation.as_deref()),
            status: format_status(record.status.as_deref(), record.gender.as_deref()),
            quote: select_quote(record.phrases.as_ref())
                .filter(|q| !q.is_empty())
                .unwrap_or(NO_QUOTES)
                .to_string(),
        }
    }

    /// Detail rows in card order: age, birthday, gender, occupation, status.
    pub fn detail_rows(&self) -> [DetailRow<'_>; 5] {
        [
            DetailRow { label: "Idade", value: &self.age, category: None },
            DetailRow { label: "Aniversário", value: &self.birthdate, category: None },
            DetailRow { label: "Gênero", value: &self.gender, category: None },
            DetailRow { label: "Ocupação", value: &self.occupation, category: None },
            DetailRow {
                label: "Status",
                value: &self.status.text,
                category: Some(self.status.category),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::characters::record::Phrases;

    fn homer() -> CharacterRecord {
        CharacterRecord {
            id: Some(1),
            name: Some("Homer Simpson".into()),
            age: Some(39.0),
            birthdate: Some("1956-05-12".into()),
            gender: Some("Male".into()),
            occupation: Some("Safety Inspector".into()),
            status: Some("Alive".into()),
            portrait_path: Some("/character/1.webp".into()),
            phrases: Some(Phrases::Many(vec!["Doh!".into()])),
        }
    }

    #[test]
    fn test_full_view() {
        let view = CharacterView::from_record(&homer(), &PortraitUrls::default());
        assert_eq!(view.display_name, "Homer Simpson");
        assert_eq!(view.caption, "Homer Simpson");
        assert_eq!(view.image_url, "https://cdn.thesimpsonsapi.com/500/character/1.webp");
        assert_eq!(view.full_image_url, "https://cdn.thesimpsonsapi.com/1280/character/1.webp");
        assert_eq!(view.age, "39 anos");
        assert_eq!(view.birthdate, "12 de maio de 1956");
        assert_eq!(view.gender, "Homem");
        assert_eq!(view.occupation, "Safety Inspector");
        assert_eq!(view.status.text, "Vivo");
        assert_eq!(view.status.category, StatusCategory::Alive);
        assert_eq!(view.quote, "Doh!");
    }

    #[test]
    fn test_empty_record_defaults() {
        let view = CharacterView::from_record(&CharacterRecord::default(), &PortraitUrls::default());
        assert_eq!(view.display_name, UNKNOWN_CHARACTER);
        assert_eq!(view.caption, GENERIC_CAPTION);
        assert!(view.image_url.ends_with("/500/character/placeholder.webp"));
        assert!(view.full_image_url.ends_with("/1280/character/placeholder.webp"));
        assert_eq!(view.age, "Não informado");
        assert_eq!(view.status.text, "Desconhecido");
        assert_eq!(view.quote, NO_QUOTES);
    }

    #[test]
    fn test_empty_name_passes_through() {
        let record = CharacterRecord::from_value(serde_json::json!({ "name": "" }));
        let view = CharacterView::from_record(&record, &PortraitUrls::default());
        assert_eq!(view.display_name, "");
        assert_eq!(view.caption, "");
        assert_eq!(view.occupation, "Não informado");
    }

    #[test]
    fn test_empty_single_phrase_falls_back() {
        let record = CharacterRecord {
            phrases: Some(Phrases::One(String::new())),
            ..CharacterRecord::default()
        };
        let view = CharacterView::from_record(&record, &PortraitUrls::default());
        assert_eq!(view.quote, NO_QUOTES);
    }

    #[test]
    fn test_detail_rows_order_and_status_category() {
        let view = CharacterView::from_record(&homer(), &PortraitUrls::default());
        let rows = view.detail_rows();
        let labels: Vec<_> = rows.iter().map(|r| r.label).collect();
        assert_eq!(labels, ["Idade", "Aniversário", "Gênero", "Ocupação", "Status"]);
        assert!(rows[..4].iter().all(|r| r.category.is_none()));
        assert_eq!(rows[4].category, Some(StatusCategory::Alive));
        assert_eq!(rows[4].value, "Vivo");
    }
}
