use std::sync::Arc;

use dioxus::prelude::*;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::infra::storage::memory::MemoryKvStore;
use crate::infra::storage::sqlite::SqliteKvStore;
use crate::infra::xlsx::codec::XlsxCodec;
use crate::platform::desktop::paths::db_path;
use crate::usecase::ports::storage::KeyValueStore;
use crate::usecase::services::review_service::ReviewService;

#[derive(Clone, Copy)]
pub struct AppState {
    pub session: Signal<ReviewService>,
    pub address: Signal<String>,
    pub searching: Signal<bool>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            session: use_signal(|| build_session(config)),
            address: use_signal(String::new),
            searching: use_signal(|| false),
        }
    }

    /// Prefills the search box with the store now under review.
    pub fn sync_address(&mut self) {
        let name = self
            .session
            .read()
            .current()
            .map(|record| record.store_name());
        if let Some(name) = name {
            self.address.set(name);
        }
    }
}

pub fn build_session(config: &AppConfig) -> ReviewService {
    let path = db_path(&config.data_dir);
    let (storage, fallback): (Arc<dyn KeyValueStore>, Option<String>) =
        match SqliteKvStore::open(&path) {
            Ok(store) => {
                info!(db = %path.display(), "opened ledger storage");
                (Arc::new(store), None)
            }
            Err(err) => {
                warn!(%err, "falling back to in-memory ledger storage");
                (
                    Arc::new(MemoryKvStore::new()),
                    Some(format!("{err}. Updates will not survive a restart.")),
                )
            }
        };

    let mut session = ReviewService::restore(Arc::new(XlsxCodec), storage, config.zoom);
    if let Some(warning) = fallback {
        let status = format!("{} {warning}", session.status());
        session.report(status);
    }
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::config::DATA_DIR_ENV;

    fn unique_test_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("store-locator-{prefix}-{nanos}"))
    }

    fn config_for(data_dir: &std::path::Path) -> AppConfig {
        let dir = data_dir.to_string_lossy().into_owned();
        AppConfig::from_lookup(|key| (key == DATA_DIR_ENV).then(|| dir.clone()))
            .expect("config should build")
    }

    #[test]
    fn build_session_uses_sqlite_under_data_dir() {
        let temp_dir = unique_test_dir("session-sqlite");

        let session = build_session(&config_for(&temp_dir));

        assert!(db_path(&temp_dir).is_file(), "ledger database should be created");
        assert_eq!(session.status(), "Upload an Excel file to start.");

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn build_session_falls_back_to_memory() {
        let temp_dir = unique_test_dir("session-fallback");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        let blocker = temp_dir.join("blocker");
        fs::write(&blocker, "not a dir").expect("should write blocker file");

        let session = build_session(&config_for(&blocker));

        assert!(
            session.status().contains("will not survive a restart"),
            "fallback should be reported: {}",
            session.status()
        );

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }
}
