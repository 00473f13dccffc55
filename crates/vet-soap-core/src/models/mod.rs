//! Domain models for the vet-soap system.

mod clinical;
mod note;

pub use clinical::*;
pub use note::*;
