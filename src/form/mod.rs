//! Entity edit-form pipeline
//!
//! File-to-preview adapter -> form state controller -> submission dispatcher
//! -> status reflector. Screens build an `EntityForm` from a schema and drive
//! it once per frame.

mod payload;
mod pipeline;
pub mod preview;
mod record;
mod reflector;
mod schema;
mod status;

pub use payload::Payload;
pub use pipeline::{EntityForm, EntitySnapshot, FormMode, SubmitOutcome};
pub use preview::FileSelection;
pub use record::{FieldMap, FieldValue, FormRecord};
pub use reflector::reflect;
pub use schema::{FieldKind, FieldSpec, ADD_PROJECT, UPDATE_PROFILE, UPDATE_PROJECT};
pub use status::{StatusError, SubmissionStatus};
