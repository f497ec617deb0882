use serde::{Deserialize, Serialize};

/// A stored phrase/value mapping
///
/// `phrase` is unique across the table; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Store-generated identifier
    pub id: i64,

    /// Unique phrase, trimmed
    pub phrase: String,

    /// Gematria value recorded for the phrase
    pub value: i64,
}

/// Phrase/value pair without an id, used for inserts and upserts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub phrase: String,
    pub value: i64,
}

impl NewEntry {
    /// Build a pair, trimming the phrase
    pub fn new(phrase: impl AsRef<str>, value: i64) -> Self {
        Self {
            phrase: phrase.as_ref().trim().to_string(),
            value,
        }
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    pub phrase: Option<String>,
    pub value: Option<i64>,
}

impl EntryPatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.phrase.is_none() && self.value.is_none()
    }

    /// Apply the patch to an entry, trimming a replacement phrase
    pub fn apply_to(&self, entry: &mut Entry) {
        if let Some(phrase) = &self.phrase {
            entry.phrase = phrase.trim().to_string();
        }
        if let Some(value) = self.value {
            entry.value = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_trims_phrase() {
        let row = NewEntry::new("  שלום ", 376);
        assert_eq!(row.phrase, "שלום");
        assert_eq!(row.value, 376);
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut entry = Entry {
            id: 1,
            phrase: "אב".to_string(),
            value: 3,
        };

        EntryPatch {
            phrase: None,
            value: Some(9),
        }
        .apply_to(&mut entry);
        assert_eq!(entry.phrase, "אב");
        assert_eq!(entry.value, 9);

        EntryPatch {
            phrase: Some(" גד ".to_string()),
            value: None,
        }
        .apply_to(&mut entry);
        assert_eq!(entry.phrase, "גד");
        assert_eq!(entry.value, 9);
    }

    #[test]
    fn test_empty_patch() {
        assert!(EntryPatch::default().is_empty());
    }
}
