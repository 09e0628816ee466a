//! # Record Store
//!
//! A minimal embedded record store kept in a single JSON file of the shape
//! `{"pdfs": [...], "sheets": [...]}`.
//!
//! Every operation reads the whole document, and every mutation writes the whole
//! document back. Mutations run under one write lock owned by the store handle, so
//! within a process a read-modify-write is an atomic unit and concurrent requests
//! cannot lose each other's updates. Writes go to a temp file that is renamed over
//! the backing file.
//!
//! The store itself knows nothing about who is calling. [`RecordStore::scoped`]
//! returns a [`TeamStore`] that applies the team partition to every read and write;
//! request handlers only ever go through that view.

mod file;
mod records;

pub(crate) use file::{read_json, write_json_atomic};
pub use records::SheetPatch;

use crate::error::{AppError, Result};
use common::model::pdf::PdfRecord;
use common::model::sheet::SheetRecord;
use log::debug;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// The full in-memory form of the store file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub pdfs: Vec<PdfRecord>,
    #[serde(default)]
    pub sheets: Vec<SheetRecord>,
    /// Top-level keys this version does not know about, kept as-is.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A record type living in one named collection of the [`Document`].
pub trait Record: Clone + Send + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn team(&self) -> &str;
    fn set_team(&mut self, team: String);

    fn items(doc: &Document) -> &Vec<Self>;
    fn items_mut(doc: &mut Document) -> &mut Vec<Self>;
}

/// A partial update of a record. Only the fields it names are overwritten.
pub trait Patch<R> {
    fn apply(self, record: &mut R);
}

pub struct RecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Opens the store at `path`. The file does not need to exist yet, but if it does
    /// it must parse, so a corrupt store is caught at startup.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        let doc = store.load()?;
        debug!(
            "opened store {} ({} pdfs, {} sheets)",
            store.path.display(),
            doc.pdfs.len(),
            doc.sheets.len()
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the backing file. An absent file is an empty document.
    pub fn load(&self) -> Result<Document> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    /// Overwrites the backing file with `doc`.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.write(doc)
    }

    fn write(&self, doc: &Document) -> Result<()> {
        write_json_atomic(&self.path, doc)
    }

    /// Runs `f` on a freshly loaded document while holding the write lock, and saves
    /// the document afterwards if `f` reports a change.
    fn mutate<T>(&self, f: impl FnOnce(&mut Document) -> Result<(T, bool)>) -> Result<T> {
        let _guard = self.write_lock.lock();
        let mut doc = self.load()?;
        let (out, changed) = f(&mut doc)?;
        if changed {
            self.write(&doc)?;
        }
        Ok(out)
    }

    /// All records of a collection, in insertion order.
    pub fn list<R: Record>(&self) -> Result<Vec<R>> {
        let doc = self.load()?;
        Ok(R::items(&doc).clone())
    }

    /// Appends `record` under a freshly generated id and returns the stored record.
    /// Any id already on `record` is replaced.
    pub fn append<R: Record>(&self, mut record: R) -> Result<R> {
        self.mutate(|doc| {
            let items = R::items_mut(doc);
            record.set_id(fresh_id(items));
            items.push(record.clone());
            debug!("appended {} {}", R::COLLECTION, record.id());
            Ok((record, true))
        })
    }

    pub fn find_by_id<R: Record>(&self, id: &str) -> Result<R> {
        self.find_where(|r: &R| r.id() == id)?
            .ok_or_else(|| AppError::not_found(format!("{} {}", R::COLLECTION, id)))
    }

    /// First record in insertion order matching `pred`.
    pub fn find_where<R: Record>(&self, pred: impl Fn(&R) -> bool) -> Result<Option<R>> {
        let doc = self.load()?;
        Ok(R::items(&doc).iter().find(|r| pred(r)).cloned())
    }

    /// Removes the record with `id`. Deleting an absent id is a no-op returning `None`
    /// and does not touch the file.
    pub fn delete_by_id<R: Record>(&self, id: &str) -> Result<Option<R>> {
        self.delete_where(id, |_: &R| true)
    }

    fn delete_where<R: Record>(&self, id: &str, owned: impl Fn(&R) -> bool) -> Result<Option<R>> {
        self.mutate(|doc| {
            let items = R::items_mut(doc);
            let mut removed = None;
            items.retain(|r| {
                if r.id() == id && owned(r) {
                    removed.get_or_insert_with(|| r.clone());
                    false
                } else {
                    true
                }
            });
            let changed = removed.is_some();
            if changed {
                debug!("deleted {} {}", R::COLLECTION, id);
            }
            Ok((removed, changed))
        })
    }

    /// Applies `patch` to the record with `id` and returns the updated record.
    pub fn replace_fields<R: Record, P: Patch<R>>(&self, id: &str, patch: P) -> Result<R> {
        self.replace_where(id, patch, |_: &R| true)
    }

    fn replace_where<R: Record, P: Patch<R>>(
        &self,
        id: &str,
        patch: P,
        owned: impl Fn(&R) -> bool,
    ) -> Result<R> {
        self.mutate(|doc| {
            let record = R::items_mut(doc)
                .iter_mut()
                .find(|r| r.id() == id && owned(r))
                .ok_or_else(|| AppError::not_found(format!("{} {}", R::COLLECTION, id)))?;
            patch.apply(record);
            Ok((record.clone(), true))
        })
    }

    /// A view of the store restricted to one team's records.
    pub fn scoped<'a>(&'a self, team: &'a str) -> TeamStore<'a> {
        TeamStore { store: self, team }
    }
}

fn fresh_id<R: Record>(existing: &[R]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !existing.iter().any(|r| r.id() == id) {
            return id;
        }
    }
}

/// Team-partitioned access to a [`RecordStore`]. Records of other teams behave
/// exactly like records that do not exist.
pub struct TeamStore<'a> {
    store: &'a RecordStore,
    team: &'a str,
}

impl TeamStore<'_> {
    pub fn list<R: Record>(&self) -> Result<Vec<R>> {
        let mut items = self.store.list::<R>()?;
        items.retain(|r| r.team() == self.team);
        Ok(items)
    }

    pub fn find<R: Record>(&self, id: &str) -> Result<R> {
        self.find_where(|r: &R| r.id() == id)?
            .ok_or_else(|| AppError::not_found(format!("{} {}", R::COLLECTION, id)))
    }

    pub fn find_where<R: Record>(&self, pred: impl Fn(&R) -> bool) -> Result<Option<R>> {
        self.store
            .find_where(|r: &R| r.team() == self.team && pred(r))
    }

    /// Appends `record` as belonging to this team, whatever team it carried before.
    pub fn append<R: Record>(&self, mut record: R) -> Result<R> {
        record.set_team(self.team.to_string());
        self.store.append(record)
    }

    pub fn delete<R: Record>(&self, id: &str) -> Result<Option<R>> {
        self.store.delete_where(id, |r: &R| r.team() == self.team)
    }

    pub fn replace_fields<R: Record, P: Patch<R>>(&self, id: &str, patch: P) -> Result<R> {
        self.store
            .replace_where(id, patch, |r: &R| r.team() == self.team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn setup() -> (TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("storage.json")).unwrap();
        (dir, store)
    }

    fn sheet(name: &str, url: &str, team: &str) -> SheetRecord {
        SheetRecord {
            id: String::new(),
            name: name.to_string(),
            url: url.to_string(),
            created_at: "01-02-2024 10:00".to_string(),
            team: team.to_string(),
        }
    }

    fn pdf(name: &str, team: &str) -> PdfRecord {
        PdfRecord {
            id: String::new(),
            original_name: name.to_string(),
            filename: format!("key_{}", name),
            uploaded_at: "01-02-2024 10:00".to_string(),
            team: team.to_string(),
        }
    }

    #[test]
    fn missing_file_loads_as_empty_collections() {
        let (_dir, store) = setup();
        let doc = store.load().unwrap();
        assert!(doc.pdfs.is_empty());
        assert!(doc.sheets.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            RecordStore::open(&path),
            Err(AppError::CorruptStore { .. })
        ));
    }

    #[test]
    fn save_of_load_keeps_content() {
        let (_dir, store) = setup();
        store.append(sheet("Q1", "http://x", "teamA")).unwrap();
        store.append(pdf("report.pdf", "teamB")).unwrap();

        let before = store.load().unwrap();
        store.save(&before).unwrap();
        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn unknown_collections_survive_writes() {
        let (_dir, store) = setup();
        fs::write(
            store.path(),
            r#"{"pdfs": [], "sheets": [], "notes": [{"id": "n1"}]}"#,
        )
        .unwrap();
        store.append(sheet("Q1", "http://x", "teamA")).unwrap();

        let raw: Value = serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["notes"][0]["id"], "n1");
        assert_eq!(raw["sheets"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn appended_record_can_be_found_with_its_generated_id() {
        let (_dir, store) = setup();
        let input = sheet("Q1", "http://x", "teamA");
        let stored = store.append(input.clone()).unwrap();
        assert!(!stored.id.is_empty());

        let found: SheetRecord = store.find_by_id(&stored.id).unwrap();
        assert_eq!(
            found,
            SheetRecord {
                id: stored.id.clone(),
                ..input
            }
        );
    }

    #[test]
    fn ids_are_unique_and_order_is_insertion_order() {
        let (_dir, store) = setup();
        for i in 0..25 {
            store.append(sheet(&format!("s{}", i), "http://x", "teamA")).unwrap();
        }
        let sheets: Vec<SheetRecord> = store.list().unwrap();
        let ids: HashSet<_> = sheets.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 25);
        let names: Vec<_> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names[0], "s0");
        assert_eq!(names[24], "s24");
    }

    #[test]
    fn concurrent_appends_are_not_lost() {
        let (_dir, store) = setup();
        let store = Arc::new(store);
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                thread::spawn(move || {
                    for i in 0..10 {
                        store
                            .append(sheet(&format!("{}-{}", t, i), "http://x", "teamA"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let sheets: Vec<SheetRecord> = store.list().unwrap();
        assert_eq!(sheets.len(), 80);
        let ids: HashSet<_> = sheets.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 80);
    }

    #[test]
    fn deleted_record_is_not_found() {
        let (_dir, store) = setup();
        let stored = store.append(pdf("report.pdf", "teamA")).unwrap();
        let removed: Option<PdfRecord> = store.delete_by_id(&stored.id).unwrap();
        assert_eq!(removed, Some(stored.clone()));
        assert!(matches!(
            store.find_by_id::<PdfRecord>(&stored.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn deleting_a_missing_id_changes_nothing() {
        let (_dir, store) = setup();
        store.append(sheet("Q1", "http://x", "teamA")).unwrap();
        let before = fs::read(store.path()).unwrap();

        let removed: Option<SheetRecord> = store.delete_by_id("does-not-exist").unwrap();
        assert!(removed.is_none());
        let removed: Option<PdfRecord> = store.delete_by_id("does-not-exist").unwrap();
        assert!(removed.is_none());
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn replace_fields_only_touches_named_fields() {
        let (_dir, store) = setup();
        let stored = store.append(sheet("Q1", "http://x", "teamA")).unwrap();

        let updated: SheetRecord = store
            .replace_fields(
                &stored.id,
                SheetPatch {
                    name: Some("Q1-final".to_string()),
                    url: None,
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Q1-final");
        assert_eq!(updated.url, "http://x");

        let found: SheetRecord = store.find_by_id(&stored.id).unwrap();
        assert_eq!(found, updated);
    }

    #[test]
    fn replace_fields_on_missing_id_is_not_found() {
        let (_dir, store) = setup();
        let err = store
            .replace_fields::<SheetRecord, _>("nope", SheetPatch::default())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn team_view_hides_other_teams() {
        let (_dir, store) = setup();
        let a = store.scoped("teamA").append(pdf("a.pdf", "ignored")).unwrap();
        let b = store.scoped("teamB").append(pdf("b.pdf", "teamB")).unwrap();
        assert_eq!(a.team, "teamA");

        let team_a = store.scoped("teamA");
        let visible: Vec<PdfRecord> = team_a.list().unwrap();
        assert_eq!(visible, vec![a.clone()]);
        assert!(team_a.find::<PdfRecord>(&b.id).is_err());
        assert!(team_a
            .find_where(|p: &PdfRecord| p.filename == b.filename)
            .unwrap()
            .is_none());
    }

    #[test]
    fn team_view_cannot_mutate_other_teams() {
        let (_dir, store) = setup();
        let b = store.scoped("teamB").append(sheet("Q1", "http://x", "")).unwrap();

        let team_a = store.scoped("teamA");
        assert!(team_a.delete::<SheetRecord>(&b.id).unwrap().is_none());
        assert!(matches!(
            team_a.replace_fields::<SheetRecord, _>(
                &b.id,
                SheetPatch {
                    name: Some("hijacked".to_string()),
                    url: None
                }
            ),
            Err(AppError::NotFound(_))
        ));

        let untouched: SheetRecord = store.find_by_id(&b.id).unwrap();
        assert_eq!(untouched.name, "Q1");
    }
}
