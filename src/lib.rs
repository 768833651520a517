//! # `ican_checklist`
//!
//! Monthly career and college planning checklists for high school students.
//!
//! Default task lists are indexed by grade level and month. The first time a
//! (grade, month) checklist is shown its defaults are copied into the local
//! store; from then on the stored list is authoritative and progress survives
//! restarts.

pub mod checklist;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod navigation;
pub mod paths;
pub mod profile;
pub mod storage;
pub mod templates;
pub mod testing;
pub mod traits;
pub mod view;

pub use checklist::{Catalog, GradeLevel, Month, Scope, Task, TaskStateResolver};
pub use error::{Error, Result};
pub use profile::UserProfile;
pub use traits::KeyValueStore;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
