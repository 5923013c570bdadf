use crate::config::AppConfig;
use anyhow::Context;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Which of the two flat upload directories a file belongs to. Banners share
/// the image directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    Image,
    Video,
}

/// Local-disk store behind the `/images` and `/videos` namespaces.
pub struct MediaStore {
    images_dir: PathBuf,
    videos_dir: PathBuf,
}

pub async fn setup_storage(config: &AppConfig) -> anyhow::Result<Arc<MediaStore>> {
    let store = MediaStore {
        images_dir: config.images_dir(),
        videos_dir: config.videos_dir(),
    };

    tokio::fs::create_dir_all(&store.images_dir)
        .await
        .with_context(|| format!("creating {}", store.images_dir.display()))?;
    tokio::fs::create_dir_all(&store.videos_dir)
        .await
        .with_context(|| format!("creating {}", store.videos_dir.display()))?;

    info!(
        "Media store ready: images={}, videos={}",
        store.images_dir.display(),
        store.videos_dir.display()
    );

    Ok(Arc::new(store))
}

impl MediaStore {
    pub fn dir(&self, category: MediaCategory) -> &Path {
        match category {
            MediaCategory::Image => &self.images_dir,
            MediaCategory::Video => &self.videos_dir,
        }
    }

    /// Stored names embed the upload instant so they are never reused:
    /// `{field}_{millis}{original extension}`.
    pub fn generate_name(field: &str, original_name: &str) -> String {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        format!("{}_{}{}", field, Utc::now().timestamp_millis(), ext)
    }

    /// Write the upload to its category directory and return the stored name.
    /// The metadata record must only be created after this succeeds.
    pub async fn store(
        &self,
        category: MediaCategory,
        field: &str,
        original_name: &str,
        data: &[u8],
    ) -> anyhow::Result<String> {
        let file_name = Self::generate_name(field, original_name);
        let path = self.dir(category).join(&file_name);

        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        Ok(file_name)
    }

    /// Best-effort removal when a record is deleted; a file that is already
    /// gone is logged and ignored.
    pub async fn remove(&self, category: MediaCategory, file_name: &str) {
        let path = self.dir(category).join(file_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!("Could not remove {}: {}", path.display(), e);
        }
    }
}
