// src/store.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Durable set of links we have already alerted on.
///
/// The whole set lives in one JSON array on disk. Every access reads the
/// file in full and every addition rewrites it in full (temp file, then
/// rename), so a half-written file can never be observed. Write volume is a
/// handful of links per day; simplicity wins over efficiency here.
///
/// Links are never removed or mutated once recorded.
pub struct LinkStore {
    path: PathBuf,
}

impl LinkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full set. A missing file is an empty set (fresh host);
    /// anything else that goes wrong is the caller's problem.
    pub async fn load(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s)
                .with_context(|| format!("parsing {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    pub async fn contains(&self, link: &str) -> Result<bool> {
        Ok(self.load().await?.iter().any(|l| l == link))
    }

    /// Record `link`; no-op if already present. The updated set is on disk
    /// before this returns, so a crash afterwards never re-alerts for it.
    pub async fn add(&self, link: &str) -> Result<()> {
        let mut links = self.load().await?;
        if links.iter().any(|l| l == link) {
            return Ok(());
        }
        links.push(link.to_string());
        self.write_all(&links).await
    }

    async fn write_all(&self, links: &[String]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(links).context("serializing links")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp)
            .await
            .with_context(|| format!("creating {}", tmp.display()))?;
        file.write_all(&bytes).await.context("writing links")?;
        file.flush().await.context("flushing links")?;
        drop(file);

        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_is_empty_set() {
        let tmp = TempDir::new().unwrap();
        let store = LinkStore::new(tmp.path().join("links.json"));
        assert!(store.load().await.unwrap().is_empty());
        assert!(!store.contains("a").await.unwrap());
    }

    #[tokio::test]
    async fn add_is_idempotent_and_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("links.json");

        let store = LinkStore::new(&path);
        store.add("https://example.com/vehicle/1").await.unwrap();
        store.add("https://example.com/vehicle/1").await.unwrap();

        let reopened = LinkStore::new(&path);
        assert!(reopened.contains("https://example.com/vehicle/1").await.unwrap());
        assert_eq!(reopened.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn insertion_order_is_preserved() {
        let tmp = TempDir::new().unwrap();
        let store = LinkStore::new(tmp.path().join("links.json"));
        for l in ["c", "a", "b"] {
            store.add(l).await.unwrap();
        }
        assert_eq!(store.load().await.unwrap(), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("links.json");
        std::fs::write(&path, "not json").unwrap();
        let store = LinkStore::new(&path);
        assert!(store.load().await.is_err());
        assert!(store.add("a").await.is_err());
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("links.json");
        let store = LinkStore::new(&path);
        store.add("a").await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
