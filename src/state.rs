use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    config::Config,
    counter::CounterSource,
    error::AppError,
    shell::PageShell,
    store::{DocumentStore, MemoryStore, MongoStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<Config>,
    pub counter: CounterSource,
    /// Client bundle page that rendered routes are inserted into.
    pub shell: Arc<PageShell>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        let counter = CounterSource::new(store.clone(), config.counter_fallback.clone());
        let shell = Arc::new(PageShell::load(&config.static_dir));
        Self {
            store,
            config: Arc::new(config),
            counter,
            shell,
        }
    }

    /// Connects to MongoDB when a URL is configured, otherwise starts empty in memory.
    pub async fn connect(config: Config) -> Result<Self, AppError> {
        let store: Arc<dyn DocumentStore> = match &config.mongo_url {
            Some(url) => Arc::new(MongoStore::connect(url, &config.database).await?),
            None => {
                warn!("STUDYHALL_MONGO_URL not set, data is kept in memory only");
                Arc::new(MemoryStore::new())
            }
        };

        info!("State ready (database: {})", config.database);
        Ok(Self::new(store, config))
    }
}
