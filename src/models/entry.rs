use serde::{Deserialize, Serialize};

pub const COLLECTION: &str = "entries";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub text: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NewEntry {
    pub title: String,
    pub text: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub text: Option<String>,
}

impl Entry {
    pub fn apply(self, patch: EntryPatch) -> Entry {
        Entry {
            id: self.id,
            title: patch.title.filter(|t| !t.is_empty()).unwrap_or(self.title),
            text: patch.text.filter(|t| !t.is_empty()).unwrap_or(self.text),
        }
    }
}
