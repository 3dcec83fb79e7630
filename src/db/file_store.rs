// src/db/file_store.rs
// DOCUMENTATION: Flat-file record store
// PURPOSE: Keep each record kind as one JSON array on disk

use crate::db::RecordStore;
use crate::errors::GalleryError;
use crate::models::{Comment, Photo, Update};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

const PHOTOS_FILE: &str = "photos.json";
const COMMENTS_FILE: &str = "comments.json";
const UPDATES_FILE: &str = "updates.json";

/// Record store backed by `photos.json`, `comments.json` and `updates.json`
/// DOCUMENTATION: Every mutation rewrites the whole file. The mutex serializes
/// read-modify-write cycles inside this process only; running several
/// processes against the same directory can still lose writes.
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (and create if needed) the data directory
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, GalleryError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        log::info!("Using JSON file record store at {}", dir.display());

        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    async fn read_all<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, GalleryError> {
        read_records(&self.path(file)).await
    }

    /// Read the file, let `f` change the records, write them back
    async fn mutate<T, R, F>(&self, file: &str, f: F) -> Result<R, GalleryError>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.write_lock.lock().await;

        let path = self.path(file);
        let mut records = read_records::<T>(&path).await?;
        let result = f(&mut records);
        write_records(&path, &records).await?;

        Ok(result)
    }
}

async fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, GalleryError> {
    match tokio::fs::read(path).await {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
            log::error!("Corrupt record file {}: {}", path.display(), e);
            GalleryError::StorageError(format!("Unreadable {}: {}", path.display(), e))
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

async fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), GalleryError> {
    let json = serde_json::to_vec_pretty(records)
        .map_err(|e| GalleryError::InternalError(format!("Serialize records failed: {}", e)))?;

    // Rename is atomic, so readers never see a half-written file
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;

    Ok(())
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn list_photos(&self) -> Result<Vec<Photo>, GalleryError> {
        let mut photos: Vec<Photo> = self.read_all(PHOTOS_FILE).await?;
        photos.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(photos)
    }

    async fn get_photo(&self, id: Uuid) -> Result<Option<Photo>, GalleryError> {
        let photos: Vec<Photo> = self.read_all(PHOTOS_FILE).await?;
        Ok(photos.into_iter().find(|p| p.id == id))
    }

    async fn insert_photo(&self, photo: &Photo) -> Result<(), GalleryError> {
        self.mutate(PHOTOS_FILE, |photos: &mut Vec<Photo>| photos.push(photo.clone()))
            .await
    }

    async fn delete_photo(&self, id: Uuid) -> Result<bool, GalleryError> {
        self.mutate(PHOTOS_FILE, |photos: &mut Vec<Photo>| {
            let before = photos.len();
            photos.retain(|p| p.id != id);
            photos.len() != before
        })
        .await
    }

    async fn list_comments(&self, photo_id: Uuid) -> Result<Vec<Comment>, GalleryError> {
        let comments: Vec<Comment> = self.read_all(COMMENTS_FILE).await?;
        let mut comments: Vec<Comment> = comments
            .into_iter()
            .filter(|c| c.photo_id == photo_id)
            .collect();
        comments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), GalleryError> {
        self.mutate(COMMENTS_FILE, |comments: &mut Vec<Comment>| {
            comments.push(comment.clone())
        })
        .await
    }

    async fn list_updates(&self) -> Result<Vec<Update>, GalleryError> {
        let mut updates: Vec<Update> = self.read_all(UPDATES_FILE).await?;
        updates.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(updates)
    }

    async fn insert_update(&self, update: &Update) -> Result<(), GalleryError> {
        self.mutate(UPDATES_FILE, |updates: &mut Vec<Update>| {
            updates.push(update.clone())
        })
        .await
    }

    async fn delete_update(&self, id: Uuid) -> Result<bool, GalleryError> {
        self.mutate(UPDATES_FILE, |updates: &mut Vec<Update>| {
            let before = updates.len();
            updates.retain(|u| u.id != id);
            updates.len() != before
        })
        .await
    }

    async fn purge_photos(&self) -> Result<u64, GalleryError> {
        self.mutate(PHOTOS_FILE, |photos: &mut Vec<Photo>| {
            photos.drain(..).count() as u64
        })
        .await
    }

    async fn purge_comments(&self) -> Result<u64, GalleryError> {
        self.mutate(COMMENTS_FILE, |comments: &mut Vec<Comment>| {
            comments.drain(..).count() as u64
        })
        .await
    }
}
