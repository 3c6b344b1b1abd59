//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and the opaque trained artifacts plus the
//! monitoring store.

mod classifier;
mod monitor;
mod scaler;

pub use classifier::{Classifier, ClassifierError};
pub use monitor::{Monitor, PredictionEvent};
pub use scaler::{Scaler, ScalerError};
