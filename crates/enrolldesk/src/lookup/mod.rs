//! Document-based person resolution: the debounced remote lookup and the
//! state machine it drives.

mod debounce;
mod resolution;

pub use debounce::DocumentLookup;
pub use resolution::{LookupOutcome, PersonFields, ResolutionMachine, ResolutionStatus};
