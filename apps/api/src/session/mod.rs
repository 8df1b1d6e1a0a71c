// Application Orchestrator: per-session workflow state, the events that move it,
// and the async sequencing around the completion calls and reveal timers.

pub mod handlers;
pub mod orchestrator;
pub mod phase;
pub mod presentation;
pub mod state;
pub mod store;

pub use phase::{Phase, TransitionError};
pub use store::SessionStore;
