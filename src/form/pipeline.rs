//! The edit-form pipeline shared by every screen.
//!
//! `EntityForm` owns one screen's draft: the record, the previews, any file
//! reads in flight and (for update screens) the one-shot entity fetch. All of
//! those tasks live in `TaskSlot`s, so leaving the screen drops them and a
//! late completion never lands in a form that is gone.

use std::collections::HashMap;
use std::future::Future;

use crate::api::{ApiError, EditableEntity};
use crate::notify::Toasts;
use crate::store::EntityStore;
use crate::task::{PollResult, TaskSlot};

use super::payload::Payload;
use super::preview::{self, FileSelection, LoadedFile, PreviewState};
use super::record::{FieldError, FieldMap, FieldValue, FormRecord};
use super::reflector;
use super::schema::FormSchema;
use super::status::StatusError;

/// Whether the screen creates a new entity or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update { id: String },
}

/// What a fetch hands back for seeding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitySnapshot {
    pub fields: FieldMap,
    /// Stored asset URLs by file field
    pub assets: Vec<(&'static str, String)>,
}

impl EntitySnapshot {
    pub fn from_entity(entity: &impl EditableEntity) -> Self {
        Self {
            fields: entity.field_map(),
            assets: entity.asset_urls(),
        }
    }
}

/// Result of pressing submit
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The payload was handed to the store
    Dispatched,
    /// A submission is already in flight; nothing was sent
    AlreadyPending,
    /// Declarative checks failed; nothing was sent
    Invalid(Vec<FieldError>),
    /// The store refused the transition
    Rejected(StatusError),
}

pub struct EntityForm {
    mode: FormMode,
    record: FormRecord,
    preview: PreviewState,
    errors: Vec<FieldError>,
    reads: HashMap<&'static str, TaskSlot<std::io::Result<LoadedFile>>>,
    fetch: TaskSlot<Result<EntitySnapshot, ApiError>>,
    fetch_started: bool,
    seeded: bool,
}

impl EntityForm {
    pub fn new(schema: &'static FormSchema, mode: FormMode) -> Self {
        Self {
            mode,
            record: FormRecord::new(schema),
            preview: PreviewState::default(),
            errors: Vec::new(),
            reads: HashMap::new(),
            fetch: TaskSlot::default(),
            fetch_started: false,
            seeded: false,
        }
    }

    pub fn entity_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Update { id } => Some(id),
        }
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut FormRecord {
        &mut self.record
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Validation message for a field from the last submit attempt
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_running()
    }

    /// Any file read or fetch still running
    pub fn is_busy(&self) -> bool {
        self.fetch.is_running() || self.reads.values().any(TaskSlot::is_running)
    }

    /// Start the entity fetch for an update screen. Runs at most once per form.
    pub fn fetch_once<F, Fut>(&mut self, fetch: F)
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<EntitySnapshot, ApiError>> + Send + 'static,
    {
        if self.fetch_started {
            return;
        }
        let FormMode::Update { id } = &self.mode else {
            return;
        };
        self.fetch_started = true;
        tracing::debug!("Fetching entity {} for {}", id, self.record.schema().name);
        self.fetch.spawn(fetch(id.clone()));
    }

    /// Seed the record from a fetched entity the first time one is available.
    pub fn seed_once(&mut self, snapshot: &EntitySnapshot) -> bool {
        if self.seeded {
            return false;
        }
        self.record.seed(&snapshot.fields);
        for (field, url) in &snapshot.assets {
            if self.preview.get(field).is_none() {
                self.preview.set(field, url.clone());
            }
        }
        self.seeded = true;
        true
    }

    /// Read a picked file in the background. No file picked is a no-op.
    pub fn select_file(&mut self, field: &str, selection: FileSelection) -> bool {
        let Some(path) = selection.first() else {
            return false;
        };
        let Some(spec) = self
            .record
            .schema()
            .field(field)
            .filter(|s| s.kind.is_file())
        else {
            tracing::warn!("Ignoring file for non-file field {}", field);
            return false;
        };

        tracing::info!("Reading {:?} for {}", path, spec.name);
        let path = path.to_path_buf();
        self.reads
            .entry(spec.name)
            .or_default()
            .spawn(preview::load_file(path));
        true
    }

    /// Apply finished file reads and the entity fetch.
    pub fn poll(&mut self, toasts: &mut Toasts) {
        let mut loaded = Vec::new();
        for (field, slot) in self.reads.iter_mut() {
            match slot.poll() {
                PollResult::Complete(Ok(Ok(file))) => loaded.push((*field, file)),
                PollResult::Complete(Ok(Err(e))) => {
                    tracing::error!("Failed to read file for {}: {}", field, e);
                    toasts.error(format!("Failed to read file: {}", e));
                }
                PollResult::Complete(Err(e)) => {
                    tracing::error!("File read task panicked: {}", e);
                }
                PollResult::Pending | PollResult::NoTask => {}
            }
        }
        for (field, file) in loaded {
            self.preview.set(field, file.data_uri);
            if let Err(e) = self.record.set(field, FieldValue::File(file.handle)) {
                tracing::error!("{}", e);
            }
        }

        match self.fetch.poll() {
            PollResult::Complete(Ok(Ok(snapshot))) => {
                self.seed_once(&snapshot);
            }
            PollResult::Complete(Ok(Err(e))) => {
                tracing::error!("Failed to fetch entity: {}", e);
                toasts.error(e.to_string());
            }
            PollResult::Complete(Err(e)) => {
                tracing::error!("Fetch task panicked: {}", e);
                toasts.error(e.to_string());
            }
            PollResult::Pending | PollResult::NoTask => {}
        }
    }

    /// Snapshot the record and hand it to the store.
    pub fn submit(&mut self, store: &mut dyn EntityStore) -> SubmitOutcome {
        if store.status().is_pending() {
            tracing::debug!("Submit ignored, already pending");
            return SubmitOutcome::AlreadyPending;
        }

        self.errors = self.record.validate();
        if !self.errors.is_empty() {
            return SubmitOutcome::Invalid(self.errors.clone());
        }

        let payload = Payload::from_record(&self.record);
        match store.dispatch_submit(self.entity_id(), payload) {
            Ok(()) => SubmitOutcome::Dispatched,
            Err(e) => {
                tracing::warn!("Submit rejected: {}", e);
                SubmitOutcome::Rejected(e)
            }
        }
    }

    /// Show the store's terminal status and acknowledge it.
    pub fn reflect(&self, store: &mut dyn EntityStore, toasts: &mut Toasts) {
        reflector::reflect(store, toasts);
    }

    /// Drop every task this form started.
    pub fn abandon(&mut self) {
        self.fetch.abandon();
        for slot in self.reads.values_mut() {
            slot.abandon();
        }
    }
}
