// Profile Capture: editable form state and its render descriptors.

pub mod form;

pub use form::{FieldUpdate, FormView, ProfileForm};
