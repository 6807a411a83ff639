//! Inspection App
//!
//! Layered architecture:
//! - domain: identity contract and shell errors
//! - repository: persistence port and its SQLite / memory / HTTP backends
//! - photo_source: where the gallery comes from
//! - scheduler: debounced background saving
//! - session: editor + stores wired together

pub mod config;
pub mod domain;
pub mod photo_source;
pub mod repository;
pub mod scheduler;
pub mod session;

use std::sync::Arc;

pub use config::AppConfig;
pub use domain::{StoreError, StoreResult};
pub use session::{InspectionSession, SessionOptions};

use photo_source::{PhotoSource, SequentialPhotoSource, StaticPhotoSource};
use repository::{init_db, FallbackStore, InspectionStore, RemoteStore, SqliteCache};

/// Local cache, plus the remote table when one is configured
pub async fn build_store(config: &AppConfig) -> StoreResult<Arc<dyn InspectionStore>> {
    let db_state = init_db(&config.db_path()).await?;
    let local = SqliteCache::new(db_state.connection());

    let remote = match &config.remote {
        Some(remote) => Some(RemoteStore::new(&remote.base_url, &remote.api_key, &remote.table)?),
        None => None,
    };
    if remote.is_none() {
        log::info!("no remote store configured, saving locally only");
    }

    Ok(Arc::new(FallbackStore::new(local, remote)))
}

pub fn build_photo_source(config: &AppConfig) -> Box<dyn PhotoSource> {
    if !config.gallery.is_empty() {
        return Box::new(StaticPhotoSource::new().with_photos(&config.property, config.gallery.clone()));
    }
    match &config.photo_storage {
        Some(storage) => Box::new(SequentialPhotoSource::new(
            &storage.base_url,
            &storage.prefix,
            storage.count,
        )),
        None => Box::new(StaticPhotoSource::new()),
    }
}

/// Open the configured inspection
pub async fn open_session(config: &AppConfig) -> StoreResult<InspectionSession> {
    let store = build_store(config).await?;
    let photos = build_photo_source(config);
    let options = SessionOptions {
        debounce: config.debounce(),
        load_timeout: config.load_timeout(),
    };
    Ok(InspectionSession::open(
        &config.inspection_id,
        &config.property,
        store,
        photos.as_ref(),
        options,
    )
    .await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_session_round_trips_through_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            gallery: vec![inspection_checklist::PhotoItem::new("u1", "Foto 1")],
            ..AppConfig::default()
        };

        let mut session = open_session(&config).await.unwrap();
        assert_eq!(session.editor().gallery().len(), 1);
        assert!(session.edit(|e| e.set_completed(true)));
        session.close().await;

        let reopened = open_session(&config).await.unwrap();
        assert!(reopened.inspection().completed);
        reopened.close().await;
    }

    #[tokio::test]
    async fn test_photo_source_precedence() {
        let mut config = AppConfig {
            photo_storage: Some(config::PhotoStorageConfig {
                base_url: "https://cdn.test".to_string(),
                prefix: "Foto".to_string(),
                count: 2,
            }),
            ..AppConfig::default()
        };
        let listed = build_photo_source(&config)
            .list_photos_for_property(&config.property)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);

        config.gallery = vec![inspection_checklist::PhotoItem::new("u9", "Foto 9")];
        let listed = build_photo_source(&config)
            .list_photos_for_property(&config.property)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].url, "u9");
    }
}
