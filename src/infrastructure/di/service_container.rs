//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::OutlineService;
use crate::config::Settings;
use crate::infrastructure::store::JsonDocumentStore;
use crate::infrastructure::traits::{
    DocumentStore, FileSystem, IdGenerator, RealFileSystem, UuidGenerator,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub outline: OutlineService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(UuidGenerator))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let settings = Arc::new(settings);
        let store: Arc<dyn DocumentStore> = Arc::new(JsonDocumentStore::new(
            Arc::clone(&fs),
            settings.data_dir.clone(),
            settings.pretty_json,
        ));
        let outline = OutlineService::new(store, ids);

        Self {
            settings,
            fs,
            outline,
        }
    }
}
