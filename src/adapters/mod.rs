//! Adapters layer: Concrete implementations of ports.
//!
//! These modules integrate the artifacts exported by the training pipeline
//! and the local monitoring store:
//! - `forest`: random forest classifier over an exported JSON artifact
//! - `scaler`: fitted standard scaler over an exported JSON artifact
//! - `artifacts`: startup loader for the model/scaler/manifest trio
//! - `sqlite`: SQLite prediction-event log

pub mod artifacts;
pub mod forest;
pub mod scaler;
pub mod sqlite;

pub use artifacts::{load_artifacts, LoadedArtifacts};
pub use forest::{ExportedForest, ExportedTree, RandomForestClassifier};
pub use scaler::{ExportedScaler, StandardScaler};
pub use sqlite::{SqliteMonitor, StorageError};
