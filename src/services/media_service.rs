use crate::api::error::AppError;
use crate::entities::{banners, gallery_images, videos};
use crate::infrastructure::storage::{MediaCategory, MediaStore};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

/// Media ingestion: write the file to its category directory first, create
/// the metadata record only once the write succeeded. Callers see the whole
/// operation succeed or fail, never a half-written state.
pub struct MediaService {
    db: DatabaseConnection,
    store: Arc<MediaStore>,
}

impl MediaService {
    pub fn new(db: DatabaseConnection, store: Arc<MediaStore>) -> Self {
        Self { db, store }
    }

    /// The banner is a singleton resource: adding one replaces whatever was
    /// there, row deletion and insert in a single transaction.
    pub async fn replace_banner(
        &self,
        original_name: &str,
        data: &[u8],
    ) -> Result<banners::Model, AppError> {
        let file_name = self
            .store
            .store(MediaCategory::Image, "banner", original_name, data)
            .await?;

        let txn = self.db.begin().await?;

        let old = banners::Entity::find().all(&txn).await?;
        banners::Entity::delete_many().exec(&txn).await?;

        let banner = banners::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            file_name: Set(file_name),
            created_at: Set(Some(Utc::now())),
            updated_at: Set(Some(Utc::now())),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        for replaced in old {
            self.store
                .remove(MediaCategory::Image, &replaced.file_name)
                .await;
        }

        Ok(banner)
    }

    pub async fn list_banners(&self) -> Result<Vec<banners::Model>, AppError> {
        let rows = banners::Entity::find()
            .order_by_asc(banners::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Deletes the first banner found, if any. Always reports success, the
    /// caller never learns whether a row existed.
    pub async fn delete_first_banner(&self) -> Result<(), AppError> {
        let existing = banners::Entity::find().one(&self.db).await?;

        if let Some(banner) = existing {
            banners::Entity::delete_by_id(banner.id.clone())
                .exec(&self.db)
                .await?;
            self.store
                .remove(MediaCategory::Image, &banner.file_name)
                .await;
        }

        Ok(())
    }

    pub async fn add_image(
        &self,
        original_name: &str,
        data: &[u8],
        caption: Option<String>,
    ) -> Result<gallery_images::Model, AppError> {
        let file_name = self
            .store
            .store(MediaCategory::Image, "image", original_name, data)
            .await?;

        let image = gallery_images::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            file_name: Set(file_name),
            caption: Set(caption),
            created_at: Set(Some(Utc::now())),
            updated_at: Set(Some(Utc::now())),
        }
        .insert(&self.db)
        .await?;

        Ok(image)
    }

    pub async fn list_images(&self) -> Result<Vec<gallery_images::Model>, AppError> {
        let rows = gallery_images::Entity::find()
            .order_by_asc(gallery_images::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Permissive delete: an unknown id yields `None`, not an error.
    pub async fn delete_image(&self, id: &str) -> Result<Option<gallery_images::Model>, AppError> {
        let existing = gallery_images::Entity::find_by_id(id).one(&self.db).await?;

        if let Some(image) = &existing {
            gallery_images::Entity::delete_by_id(image.id.clone())
                .exec(&self.db)
                .await?;
            self.store
                .remove(MediaCategory::Image, &image.file_name)
                .await;
        }

        Ok(existing)
    }

    pub async fn add_video(
        &self,
        original_name: &str,
        data: &[u8],
        caption: Option<String>,
    ) -> Result<videos::Model, AppError> {
        let file_name = self
            .store
            .store(MediaCategory::Video, "video", original_name, data)
            .await?;

        let video = videos::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            file_name: Set(file_name),
            caption: Set(caption),
            created_at: Set(Some(Utc::now())),
            updated_at: Set(Some(Utc::now())),
        }
        .insert(&self.db)
        .await?;

        Ok(video)
    }

    pub async fn list_videos(&self) -> Result<Vec<videos::Model>, AppError> {
        let rows = videos::Entity::find()
            .order_by_asc(videos::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Permissive delete, same contract as [`Self::delete_image`].
    pub async fn delete_video(&self, id: &str) -> Result<Option<videos::Model>, AppError> {
        let existing = videos::Entity::find_by_id(id).one(&self.db).await?;

        if let Some(video) = &existing {
            videos::Entity::delete_by_id(video.id.clone())
                .exec(&self.db)
                .await?;
            self.store
                .remove(MediaCategory::Video, &video.file_name)
                .await;
        }

        Ok(existing)
    }
}
