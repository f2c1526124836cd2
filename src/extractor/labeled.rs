use anyhow::{bail, Result};
use serde_json::Value;

use super::CandidateExtractor;
use crate::film::CandidateRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Studio,
    ReleaseDate,
    Duration,
    Genres,
    Countries,
    Cast,
    Directors,
    Synopsis,
}

const LABELS: &[(&str, Field)] = &[
    ("title", Field::Title),
    ("film title", Field::Title),
    ("name", Field::Title),
    ("studio", Field::Studio),
    ("label", Field::Studio),
    ("distributor", Field::Studio),
    ("production company", Field::Studio),
    ("release date", Field::ReleaseDate),
    ("released", Field::ReleaseDate),
    ("release", Field::ReleaseDate),
    ("date", Field::ReleaseDate),
    ("duration", Field::Duration),
    ("runtime", Field::Duration),
    ("running time", Field::Duration),
    ("length", Field::Duration),
    ("genre", Field::Genres),
    ("genres", Field::Genres),
    ("category", Field::Genres),
    ("categories", Field::Genres),
    ("tags", Field::Genres),
    ("country", Field::Countries),
    ("countries", Field::Countries),
    ("country of origin", Field::Countries),
    ("cast", Field::Cast),
    ("starring", Field::Cast),
    ("stars", Field::Cast),
    ("performers", Field::Cast),
    ("actors", Field::Cast),
    ("director", Field::Directors),
    ("directors", Field::Directors),
    ("directed by", Field::Directors),
    ("synopsis", Field::Synopsis),
    ("description", Field::Synopsis),
    ("plot", Field::Synopsis),
    ("summary", Field::Synopsis),
];

fn field_for(label: &str) -> Option<Field> {
    let key = label.trim().trim_end_matches(':').trim().to_lowercase();
    LABELS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, field)| *field)
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(text_of).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

fn list_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(text_of).collect(),
        Value::String(s) => s
            .split([',', ';', '|', '/'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// For catalog pages scraped as a label/value table, e.g.
/// `{"fields": {"Starring:": "A, B", "Runtime": "92 min"}}`.
#[derive(Debug, Clone, Default)]
pub struct LabeledFieldsExtractor {
    /// chrono format the site writes dates in, if it is known.
    pub date_format: Option<String>,
    pub allow_non_qualifying_roles: bool,
}

impl CandidateExtractor for LabeledFieldsExtractor {
    fn name(&self) -> &str {
        "labeled"
    }

    fn extract(&self, page: &Value) -> Result<CandidateRecord> {
        let fields = match page.get("fields").unwrap_or(page) {
            Value::Object(map) => map,
            _ => bail!("Page has no label/value table"),
        };

        let mut candidate = CandidateRecord {
            release_date_format: self.date_format.clone(),
            ..Default::default()
        };
        for (label, value) in fields {
            let Some(field) = field_for(label) else {
                continue;
            };
            match field {
                Field::Title => candidate.title = candidate.title.or_else(|| text_of(value)),
                Field::Studio => candidate.studio = candidate.studio.or_else(|| text_of(value)),
                Field::ReleaseDate => {
                    candidate.release_date = candidate.release_date.or_else(|| text_of(value))
                }
                Field::Duration => {
                    candidate.duration = candidate.duration.or_else(|| text_of(value))
                }
                Field::Synopsis => {
                    candidate.synopsis = candidate.synopsis.or_else(|| text_of(value))
                }
                Field::Genres => candidate.genres.extend(list_of(value)),
                Field::Countries => candidate.countries.extend(list_of(value)),
                Field::Cast => candidate.cast.extend(list_of(value)),
                Field::Directors => candidate.directors.extend(list_of(value)),
            }
        }
        Ok(candidate)
    }

    fn allows_non_qualifying_roles(&self) -> bool {
        self.allow_non_qualifying_roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_label_table() {
        let page = json!({
            "fields": {
                "Film Title:": "Summer Heat",
                "Label": "Falcon Studios",
                "Released": "June 1, 1994",
                "Runtime": "92 min",
                "Categories": "Outdoor; Cowboys",
                "Starring": "Zak Spears, Leo Rocha",
                "Directed By": ["Chi Chi LaRue"],
                "Rating": "5 stars"
            }
        });
        let candidate = LabeledFieldsExtractor::default().extract(&page).unwrap();

        assert_eq!(candidate.title.as_deref(), Some("Summer Heat"));
        assert_eq!(candidate.studio.as_deref(), Some("Falcon Studios"));
        assert_eq!(candidate.release_date.as_deref(), Some("June 1, 1994"));
        assert_eq!(candidate.duration.as_deref(), Some("92 min"));
        assert_eq!(candidate.genres, vec!["Outdoor", "Cowboys"]);
        assert_eq!(candidate.cast, vec!["Zak Spears", "Leo Rocha"]);
        assert_eq!(candidate.directors, vec!["Chi Chi LaRue"]);
    }

    #[test]
    fn test_flat_page_and_date_format() {
        let extractor = LabeledFieldsExtractor {
            date_format: Some("%d/%m/%Y".to_string()),
            allow_non_qualifying_roles: true,
        };
        let candidate = extractor
            .extract(&json!({"title": "Summer Heat", "length": 92}))
            .unwrap();
        assert_eq!(candidate.duration.as_deref(), Some("92"));
        assert_eq!(candidate.release_date_format.as_deref(), Some("%d/%m/%Y"));
        assert!(extractor.allows_non_qualifying_roles());
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(LabeledFieldsExtractor::default()
            .extract(&json!("Summer Heat"))
            .is_err());
    }
}
