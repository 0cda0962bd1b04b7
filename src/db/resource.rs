//! Resource repository for Shelf.
//!
//! A resource is a row in the per-user catalog of stored items: either an
//! uploaded file (with a storage key pointing at the blob on disk) or a
//! folder (metadata only).

use super::DbPool;
use crate::{Result, ShelfError};

/// Kind of catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// An uploaded file backed by a blob on disk.
    File,
    /// A folder (no blob).
    Folder,
}

impl ResourceKind {
    /// Get the string representation stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::File => "file",
            ResourceKind::Folder => "folder",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for ResourceKind {
    type Error = ShelfError;

    fn try_from(s: String) -> Result<Self> {
        match s.as_str() {
            "file" => Ok(ResourceKind::File),
            "folder" => Ok(ResourceKind::Folder),
            other => Err(ShelfError::Validation(format!(
                "unknown resource kind: {}",
                other
            ))),
        }
    }
}

/// Resource entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Resource {
    /// Resource ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Whether this row is a file or a folder.
    #[sqlx(try_from = "String")]
    pub kind: ResourceKind,
    /// Display name (original filename or folder name).
    pub name: String,
    /// Blob storage key (None for folders).
    pub storage_key: Option<String>,
    /// Parent folder ID (None for root-level entries).
    pub parent_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: String,
}

impl Resource {
    /// Whether this resource is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == ResourceKind::Folder
    }
}

/// New resource for creation.
#[derive(Debug, Clone)]
pub struct NewResource {
    /// Owning user ID.
    pub user_id: i64,
    /// File or folder.
    pub kind: ResourceKind,
    /// Display name.
    pub name: String,
    /// Blob storage key (files only).
    pub storage_key: Option<String>,
    /// Parent folder ID.
    pub parent_id: Option<i64>,
}

impl NewResource {
    /// Build a new file entry at the root level.
    pub fn file(user_id: i64, name: impl Into<String>, storage_key: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: ResourceKind::File,
            name: name.into(),
            storage_key: Some(storage_key.into()),
            parent_id: None,
        }
    }

    /// Build a new folder entry at the root level.
    pub fn folder(user_id: i64, name: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: ResourceKind::Folder,
            name: name.into(),
            storage_key: None,
            parent_id: None,
        }
    }
}

/// Repository for resource catalog operations.
pub struct ResourceRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ResourceRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new resource and return it with the assigned ID.
    pub async fn create(&self, new_resource: &NewResource) -> Result<Resource> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO resources (user_id, kind, name, storage_key, parent_id)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(new_resource.user_id)
        .bind(new_resource.kind.as_str())
        .bind(&new_resource.name)
        .bind(&new_resource.storage_key)
        .bind(new_resource.parent_id)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ShelfError::NotFound("resource".to_string()))
    }

    /// Get a resource by ID regardless of owner.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Resource>> {
        let result = sqlx::query_as::<_, Resource>(
            "SELECT id, user_id, kind, name, storage_key, parent_id, created_at
             FROM resources WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a resource by ID, scoped to one owner.
    ///
    /// Returns None both when the row does not exist and when it belongs to
    /// a different user, so callers cannot distinguish the two cases.
    pub async fn get_owned(&self, id: i64, user_id: i64) -> Result<Option<Resource>> {
        let result = sqlx::query_as::<_, Resource>(
            "SELECT id, user_id, kind, name, storage_key, parent_id, created_at
             FROM resources WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Look up a file entry by its blob storage key, scoped to one owner.
    ///
    /// Folders never match, even if a folder name collides with a key.
    pub async fn get_file_by_storage_key(
        &self,
        user_id: i64,
        storage_key: &str,
    ) -> Result<Option<Resource>> {
        let result = sqlx::query_as::<_, Resource>(
            "SELECT id, user_id, kind, name, storage_key, parent_id, created_at
             FROM resources
             WHERE user_id = $1 AND storage_key = $2 AND kind = 'file'",
        )
        .bind(user_id)
        .bind(storage_key)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// List a user's root-level entries, folders before files, names
    /// ascending within each kind.
    pub async fn list_root(&self, user_id: i64) -> Result<Vec<Resource>> {
        let result = sqlx::query_as::<_, Resource>(
            "SELECT id, user_id, kind, name, storage_key, parent_id, created_at
             FROM resources
             WHERE user_id = $1 AND parent_id IS NULL
             ORDER BY kind DESC, name ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(result)
    }

    /// Delete a resource by ID. Returns true if a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository};

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser {
                username: "owner".to_string(),
                password: "hash".to_string(),
                email: None,
            })
            .await
            .unwrap();
        (db, user.id)
    }

    #[tokio::test]
    async fn test_create_file_resource() {
        let (db, user_id) = setup().await;
        let repo = ResourceRepository::new(db.pool());

        let resource = repo
            .create(&NewResource::file(user_id, "report.pdf", "1700000000000-report.pdf"))
            .await
            .unwrap();

        assert_eq!(resource.kind, ResourceKind::File);
        assert_eq!(resource.name, "report.pdf");
        assert_eq!(
            resource.storage_key.as_deref(),
            Some("1700000000000-report.pdf")
        );
        assert!(resource.parent_id.is_none());
    }

    #[tokio::test]
    async fn test_create_folder_resource() {
        let (db, user_id) = setup().await;
        let repo = ResourceRepository::new(db.pool());

        let resource = repo
            .create(&NewResource::folder(user_id, "Documents"))
            .await
            .unwrap();

        assert_eq!(resource.kind, ResourceKind::Folder);
        assert!(resource.is_folder());
        assert!(resource.storage_key.is_none());
    }

    #[tokio::test]
    async fn test_list_root_orders_folders_first() {
        let (db, user_id) = setup().await;
        let repo = ResourceRepository::new(db.pool());

        repo.create(&NewResource::file(user_id, "b.txt", "1-b.txt"))
            .await
            .unwrap();
        repo.create(&NewResource::folder(user_id, "Zeta"))
            .await
            .unwrap();
        repo.create(&NewResource::file(user_id, "a.txt", "2-a.txt"))
            .await
            .unwrap();
        repo.create(&NewResource::folder(user_id, "Alpha"))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .list_root(user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["Alpha", "Zeta", "a.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn test_get_owned_hides_other_users_rows() {
        let (db, user_id) = setup().await;
        let other = UserRepository::new(db.pool())
            .create(&NewUser {
                username: "intruder".to_string(),
                password: "hash".to_string(),
                email: None,
            })
            .await
            .unwrap();

        let repo = ResourceRepository::new(db.pool());
        let resource = repo
            .create(&NewResource::file(user_id, "secret.txt", "3-secret.txt"))
            .await
            .unwrap();

        assert!(repo.get_owned(resource.id, user_id).await.unwrap().is_some());
        assert!(repo.get_owned(resource.id, other.id).await.unwrap().is_none());
        assert!(repo.get_owned(9999, user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_file_by_storage_key_skips_folders() {
        let (db, user_id) = setup().await;
        let repo = ResourceRepository::new(db.pool());

        repo.create(&NewResource::file(user_id, "notes.txt", "4-notes.txt"))
            .await
            .unwrap();
        repo.create(&NewResource::folder(user_id, "4-notes.txt"))
            .await
            .unwrap();

        let found = repo
            .get_file_by_storage_key(user_id, "4-notes.txt")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.kind, ResourceKind::File);

        assert!(repo
            .get_file_by_storage_key(user_id, "missing-key")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_resource() {
        let (db, user_id) = setup().await;
        let repo = ResourceRepository::new(db.pool());

        let resource = repo
            .create(&NewResource::folder(user_id, "Trash"))
            .await
            .unwrap();

        assert!(repo.delete(resource.id).await.unwrap());
        assert!(!repo.delete(resource.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_resources_removed_when_user_deleted() {
        let (db, user_id) = setup().await;
        let repo = ResourceRepository::new(db.pool());

        let resource = repo
            .create(&NewResource::file(user_id, "gone.txt", "5-gone.txt"))
            .await
            .unwrap();

        UserRepository::new(db.pool()).delete(user_id).await.unwrap();
        assert!(repo.get_by_id(resource.id).await.unwrap().is_none());
    }
}
