//! Application layer for the student profile editor.
//!
//! This crate owns the profile screen's state: the committed profile, the
//! in-progress draft, and the load/edit/save cycle that moves data between
//! them and the store.

pub mod controller;
pub mod outcome;
pub mod view;

pub use controller::{EditError, EditMode, ProfileController};
pub use outcome::{LoadOutcome, Notice, PictureOutcome, SubmitOutcome};
pub use view::ProfileView;
