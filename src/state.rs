use crate::layout::LayoutConfig;
use crate::storage::ResponseStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<ResponseStore>>,
    pub layout: Arc<LayoutConfig>,
}

impl AppState {
    pub fn new(store: ResponseStore) -> Self {
        Self::with_layout(store, LayoutConfig::default())
    }

    pub fn with_layout(store: ResponseStore, layout: LayoutConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            layout: Arc::new(layout),
        }
    }
}
