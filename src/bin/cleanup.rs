// src/bin/cleanup.rs
// DOCUMENTATION: Maintenance tool
// PURPOSE: Wipe every photo and comment record from the configured record store
//
// Image bytes are left alone; clear the uploads directory or the Cloudinary
// folder separately. Updates are kept.

use anyhow::Context;
use event_gallery::{config::Config, open_record_store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let records = open_record_store(&config).await?;

    let photos = records
        .purge_photos()
        .await
        .context("deleting photo records")?;
    log::info!("Deleted {} photo records", photos);

    let comments = records
        .purge_comments()
        .await
        .context("deleting comment records")?;
    log::info!("Deleted {} comment records", comments);

    log::info!("Record store cleaned");
    Ok(())
}
