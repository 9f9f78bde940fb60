//! Client-side orchestration core for a course-enrollment administration
//! console.
//!
//! The remote API owns every record; this crate only shapes and sequences
//! requests against it. Four reusable engines carry the interesting
//! behavior:
//!
//! - [`lookup::DocumentLookup`] — debounced person lookup by document
//!   number, with stale-response discard.
//! - [`lookup::ResolutionMachine`] — the "does this person already exist"
//!   state machine gating personal-data entry.
//! - the per-flow workflows in [`forms`] — ordered, partially-failable
//!   multi-step saves (person-then-role creation, role-then-person
//!   deletion).
//! - [`typeahead::TypeaheadSelect`] — in-memory catalog filtering with
//!   single-selection semantics.

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod forms;
pub mod lookup;
pub mod telemetry;
pub mod typeahead;

pub use api::{ApiClient, ApiError, HttpApi};
pub use forms::SaveError;
