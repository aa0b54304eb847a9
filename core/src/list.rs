//! In-memory to-do list controller.
//!
//! # Design
//! `TodoList` owns the records, its own id counter, the pending input of the
//! add form and a single revision draft shared by all records. Each record
//! is either Viewing or Editing; `toggle_edit` flips between the two and
//! `commit_revision` replaces text without leaving Editing.
//!
//! Rejections (empty text) and lookup misses are silent no-ops. Only the
//! exact empty string is rejected: whitespace-only text is stored as is.
//!
//! The revision target is always passed in explicitly by whoever owns the
//! revision form, never inferred from edit state. One shared draft is only
//! meaningful while at most one record is Editing; that is not enforced.

use serde::{Deserialize, Serialize};

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: u64,
    pub text: String,
    pub is_editing: bool,
}

/// Events raised by the list's UI surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// The add form's input changed.
    Input(String),
    /// The add form was submitted.
    Submit,
    /// A record's delete trigger.
    Delete(u64),
    /// A record's update/cancel trigger.
    Toggle(u64),
    /// The revision form's input changed.
    DraftInput(String),
    /// The revision form owned by record `id` was submitted.
    Revise { id: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    records: Vec<Record>,
    next_id: u64,
    input: String,
    draft: String,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next successful `add` will assign.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Ids of every record currently in Editing, in display order.
    pub fn editing_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.records
            .iter()
            .filter(|record| record.is_editing)
            .map(|record| record.id)
    }

    /// Counter line shown above the list.
    pub fn heading(&self) -> String {
        format!("To-Do-List : {}", self.records.len())
    }

    /// Label of a record's toggle trigger.
    pub fn toggle_label(record: &Record) -> &'static str {
        if record.is_editing {
            "Cancel"
        } else {
            "Update"
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Appends a Viewing record and returns its id, or `None` if `text` is
    /// empty. Clears the pending input on success.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        if text.is_empty() {
            tracing::trace!("add ignored, empty text");
            return None;
        }
        let id = self.next_id;
        self.records.push(Record {
            id,
            text: text.to_string(),
            is_editing: false,
        });
        self.next_id += 1;
        self.input.clear();
        tracing::debug!(id, "record added");
        Some(id)
    }

    /// Adds the pending input.
    pub fn submit(&mut self) -> Option<u64> {
        let text = std::mem::take(&mut self.input);
        let added = self.add(&text);
        if added.is_none() {
            self.input = text;
        }
        added
    }

    pub fn remove(&mut self, id: u64) -> Option<Record> {
        let index = self.records.iter().position(|record| record.id == id)?;
        tracing::debug!(id, "record removed");
        Some(self.records.remove(index))
    }

    /// Flips Viewing/Editing on `id` and clears the draft. The draft is
    /// cleared even when `id` is unknown. Returns the new edit flag.
    pub fn toggle_edit(&mut self, id: u64) -> Option<bool> {
        self.draft.clear();
        let record = self.records.iter_mut().find(|record| record.id == id)?;
        record.is_editing = !record.is_editing;
        tracing::debug!(id, editing = record.is_editing, "record toggled");
        Some(record.is_editing)
    }

    /// Replaces the text of `target_id`. Returns whether a record changed.
    pub fn commit_revision(&mut self, target_id: u64, new_text: &str) -> bool {
        if new_text.is_empty() {
            tracing::trace!(target_id, "revision ignored, empty text");
            return false;
        }
        match self.records.iter_mut().find(|record| record.id == target_id) {
            Some(record) => {
                record.text = new_text.to_string();
                tracing::debug!(target_id, "record revised");
                true
            }
            None => false,
        }
    }

    /// Commits the shared draft into `target_id`.
    pub fn revise(&mut self, target_id: u64) -> bool {
        let draft = std::mem::take(&mut self.draft);
        let revised = self.commit_revision(target_id, &draft);
        self.draft = draft;
        revised
    }

    pub fn apply(&mut self, event: ListEvent) {
        match event {
            ListEvent::Input(text) => self.set_input(text),
            ListEvent::Submit => {
                self.submit();
            }
            ListEvent::Delete(id) => {
                self.remove(id);
            }
            ListEvent::Toggle(id) => {
                self.toggle_edit(id);
            }
            ListEvent::DraftInput(text) => self.set_draft(text),
            ListEvent::Revise { id } => {
                self.revise(id);
            }
        }
    }
}
