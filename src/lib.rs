// src/lib.rs
// DOCUMENTATION: Library root shared by the server and the cleanup tool
// PURPOSE: Module tree, shared application state and backend selection

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;

use anyhow::Context;
use config::{BlobBackend, Config, RecordBackend};
use db::{JsonFileStore, PgStore, RecordStore};
use std::sync::Arc;
use storage::{BlobStore, CloudinaryBlobStore, LocalBlobStore};

/// Backends every handler works against
/// DOCUMENTATION: Cloned into each worker; the stores themselves are shared.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    pub blobs: Arc<dyn BlobStore>,
}

/// Open the record store selected by RECORD_STORE
pub async fn open_record_store(config: &Config) -> anyhow::Result<Arc<dyn RecordStore>> {
    let backend = config.record_backend().map_err(anyhow::Error::msg)?;

    let store: Arc<dyn RecordStore> = match backend {
        RecordBackend::File => Arc::new(
            JsonFileStore::open(&config.data_dir)
                .await
                .with_context(|| format!("opening data directory {}", config.data_dir.display()))?,
        ),
        RecordBackend::Postgres => {
            let pool = config::init_db_pool(config)
                .await
                .context("connecting to PostgreSQL")?;
            Arc::new(PgStore::new(pool).await.context("running migrations")?)
        }
    };
    Ok(store)
}

/// Open the blob store selected by BLOB_STORE
pub async fn open_blob_store(config: &Config) -> anyhow::Result<Arc<dyn BlobStore>> {
    let backend = config.blob_backend().map_err(anyhow::Error::msg)?;

    let store: Arc<dyn BlobStore> = match backend {
        BlobBackend::Local => Arc::new(
            LocalBlobStore::open(&config.uploads_dir)
                .await
                .with_context(|| {
                    format!("opening uploads directory {}", config.uploads_dir.display())
                })?,
        ),
        BlobBackend::Cloudinary => Arc::new(
            CloudinaryBlobStore::new(config.cloudinary.clone())
                .context("building Cloudinary client")?,
        ),
    };
    Ok(store)
}

/// Build the full application state from configuration
pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    Ok(AppState {
        records: open_record_store(config).await?,
        blobs: open_blob_store(config).await?,
    })
}
