/// UI layer: egui panels and widgets over [`crate::state::AppState`].
///
/// Rendering only reads the cached pipeline results; every edit goes through
/// an `AppState` method so the caches stay consistent.

pub mod panels;
pub mod plot;
pub mod table;
