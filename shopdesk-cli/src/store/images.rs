//! Local-directory image store

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};

use super::ImageStore;

/// Copies uploads under a root directory and hands out `file://` URLs
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// URL for an object path, each segment percent-encoded
    fn url_for(&self, object_path: &str) -> String {
        let encoded: Vec<String> = object_path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "file://{}/{}",
            self.root.display().to_string().trim_end_matches('/'),
            encoded.join("/")
        )
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(&self, source: &Path, object_path: &str) -> Result<String> {
        if object_path.split('/').any(|segment| segment == ".." || segment.is_empty()) {
            anyhow::bail!("Invalid object path: {}", object_path);
        }

        let destination = self.root.join(object_path);
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create image directory: {}", parent.display()))?;
        }

        tokio::fs::copy(source, &destination)
            .await
            .with_context(|| format!("Failed to upload image: {}", source.display()))?;

        info!("Uploaded {} to {}", source.display(), destination.display());
        Ok(self.url_for(object_path))
    }
}
