//! Document store for saved designs.
//!
//! Designs live in memory behind a `RwLock`. When a data file is configured the
//! whole collection is written to it after every mutation and read back on start.

use std::path::{Path, PathBuf};

use chrono::Utc;
use shared::validation::{validate_design_name, validate_document};
use shared::{CreateDesignRequest, DesignPatch, StoredDesign};
use tokio::sync::RwLock;

use crate::error::{ApiError, ApiResult};

pub struct DesignStorage {
    /// Insertion order
    designs: RwLock<Vec<StoredDesign>>,
    data_file: Option<PathBuf>,
}

impl DesignStorage {
    /// Store without a backing file.
    pub fn in_memory() -> Self {
        Self {
            designs: RwLock::new(Vec::new()),
            data_file: None,
        }
    }

    /// Store backed by a JSON file. A missing file starts an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> ApiResult<Self> {
        let path = path.into();
        let designs = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<StoredDesign>>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(path = %path.display(), count = designs.len(), "Loaded design store");

        Ok(Self {
            designs: RwLock::new(designs),
            data_file: Some(path),
        })
    }

    /// All designs, newest `createdAt` first.
    pub async fn list(&self) -> Vec<StoredDesign> {
        let designs = self.designs.read().await;
        let mut out: Vec<StoredDesign> = designs.iter().rev().cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    pub async fn get(&self, id: &str) -> ApiResult<StoredDesign> {
        self.designs
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn create(&self, request: CreateDesignRequest) -> ApiResult<StoredDesign> {
        let name = request.name.clone().unwrap_or_default();
        validate_document(&name, &request.containers, &request.slab_dimensions)?;

        let design = StoredDesign::new(
            uuid::Uuid::new_v4().to_string(),
            name,
            request,
            Utc::now(),
        );

        let mut designs = self.designs.write().await;
        designs.push(design.clone());
        if let Err(e) = self.persist(&designs).await {
            designs.pop();
            return Err(e);
        }

        tracing::info!(id = %design.id, name = %design.name, "Design created");
        Ok(design)
    }

    pub async fn update(&self, id: &str, patch: DesignPatch) -> ApiResult<StoredDesign> {
        if let Some(name) = &patch.name {
            validate_design_name(name)?;
        }

        let mut designs = self.designs.write().await;
        let index = designs
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

        let mut updated = designs[index].clone();
        updated.apply_patch(patch, Utc::now());
        validate_document(&updated.name, &updated.containers, &updated.slab_dimensions)?;

        let previous = std::mem::replace(&mut designs[index], updated.clone());
        if let Err(e) = self.persist(&designs).await {
            designs[index] = previous;
            return Err(e);
        }

        tracing::info!(id = %id, "Design updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let mut designs = self.designs.write().await;
        let index = designs
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

        let removed = designs.remove(index);
        if let Err(e) = self.persist(&designs).await {
            designs.insert(index, removed);
            return Err(e);
        }

        tracing::info!(id = %id, "Design deleted");
        Ok(())
    }

    async fn persist(&self, designs: &[StoredDesign]) -> ApiResult<()> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };
        let json = serde_json::to_vec_pretty(designs)?;
        write_atomic(path, &json).await?;
        tracing::debug!(path = %path.display(), count = designs.len(), "Design store written");
        Ok(())
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Container, SlabDimensions};

    fn request(name: &str) -> CreateDesignRequest {
        CreateDesignRequest {
            name: Some(name.to_string()),
            containers: vec![Container::new("container-a".to_string())],
            slab_dimensions: SlabDimensions { width: 60.0, depth: 30.0 },
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage = DesignStorage::in_memory();
        let created = storage.create(request("Cabin")).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = storage.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let storage = DesignStorage::in_memory();
        let err = storage.create(CreateDesignRequest::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(storage.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let storage = DesignStorage::in_memory();
        let a = storage.create(request("A")).await.unwrap();
        let b = storage.create(request("B")).await.unwrap();
        let c = storage.create(request("C")).await.unwrap();

        let ids: Vec<String> = storage.list().await.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let storage = DesignStorage::in_memory();
        assert!(matches!(storage.get("nope").await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let storage = DesignStorage::in_memory();
        let created = storage.create(request("Before")).await.unwrap();

        let updated = storage
            .update(
                &created.id,
                DesignPatch {
                    name: Some("After".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "After");
        assert_eq!(updated.containers, created.containers);
        assert_eq!(updated.slab_dimensions, created.slab_dimensions);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name_and_keeps_document() {
        let storage = DesignStorage::in_memory();
        let created = storage.create(request("Keep")).await.unwrap();

        let err = storage
            .update(
                &created.id,
                DesignPatch {
                    name: Some(" ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(storage.get(&created.id).await.unwrap().name, "Keep");
    }

    #[tokio::test]
    async fn test_update_missing() {
        let storage = DesignStorage::in_memory();
        let err = storage.update("nope", DesignPatch::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let storage = DesignStorage::in_memory();
        let created = storage.create(request("Gone")).await.unwrap();
        storage.delete(&created.id).await.unwrap();
        assert!(matches!(storage.get(&created.id).await, Err(ApiError::NotFound(_))));
        assert!(matches!(storage.delete(&created.id).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("designs.json");

        let created = {
            let storage = DesignStorage::open(&path).await.unwrap();
            let a = storage.create(request("Persisted")).await.unwrap();
            let b = storage.create(request("Dropped")).await.unwrap();
            storage.delete(&b.id).await.unwrap();
            a
        };

        let reopened = DesignStorage::open(&path).await.unwrap();
        let all = reopened.list().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
    }

    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DesignStorage::open(dir.path().join("none.json")).await.unwrap();
        assert!(storage.list().await.is_empty());
    }
}
