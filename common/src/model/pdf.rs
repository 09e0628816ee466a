use serde::{Deserialize, Serialize};

/// An uploaded PDF as it is catalogued in the `pdfs` collection of the store file.
///
/// The bytes themselves live in the upload directory under `filename`; this record
/// is only the catalogue entry that ties the stored file to its owning team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfRecord {
    /// Unique within the `pdfs` collection. Assigned by the store on append.
    #[serde(default)]
    pub id: String,
    /// The filename the user uploaded, shown in listings.
    pub original_name: String,
    /// Storage key inside the upload directory (`<uuid>_<original-filename>`).
    pub filename: String,
    /// Local upload time formatted as `dd-mm-YYYY HH:MM`.
    pub uploaded_at: String,
    /// Owning team. Never changes after creation.
    pub team: String,
}
