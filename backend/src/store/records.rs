use super::{Document, Patch, Record};
use common::model::pdf::PdfRecord;
use common::model::sheet::SheetRecord;

impl Record for PdfRecord {
    const COLLECTION: &'static str = "pdfs";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn team(&self) -> &str {
        &self.team
    }

    fn set_team(&mut self, team: String) {
        self.team = team;
    }

    fn items(doc: &Document) -> &Vec<Self> {
        &doc.pdfs
    }

    fn items_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.pdfs
    }
}

impl Record for SheetRecord {
    const COLLECTION: &'static str = "sheets";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn team(&self) -> &str {
        &self.team
    }

    fn set_team(&mut self, team: String) {
        self.team = team;
    }

    fn items(doc: &Document) -> &Vec<Self> {
        &doc.sheets
    }

    fn items_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.sheets
    }
}

/// The editable fields of a sheet link. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct SheetPatch {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl SheetPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none()
    }
}

impl Patch<SheetRecord> for SheetPatch {
    fn apply(self, record: &mut SheetRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(url) = self.url {
            record.url = url;
        }
    }
}
