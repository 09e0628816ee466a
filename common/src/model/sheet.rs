use serde::{Deserialize, Serialize};

/// A link to an external spreadsheet, stored in the `sheets` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub url: String,
    /// Local creation time formatted as `dd-mm-YYYY HH:MM`.
    pub created_at: String,
    pub team: String,
}
