use std::sync::Arc;

use coinplan_engine::Coordinator;

/// Shared state injected into handlers via axum's State extractor.
///
/// The coordinator owns the directory, cache and gateway; nothing here
/// is process-global.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<Coordinator>,
}
