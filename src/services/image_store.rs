use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{ImageId, LoadedImage};

/// Storage for images between the load request and the click requests
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an image, replacing any previous image with the same id
    async fn insert(&self, image: Arc<LoadedImage>);

    /// Find an image by id
    async fn get(&self, id: &ImageId) -> Option<Arc<LoadedImage>>;

    /// Number of images currently held
    async fn len(&self) -> usize;
}

struct LruImages {
    images: HashMap<ImageId, Arc<LoadedImage>>,
    /// Least recently used first
    order: Vec<ImageId>,
}

/// In-memory image store with least-recently-used eviction
pub struct InMemoryImageStore {
    inner: RwLock<LruImages>,
    max_images: usize,
}

impl InMemoryImageStore {
    pub fn new(max_images: usize) -> Self {
        Self {
            inner: RwLock::new(LruImages {
                images: HashMap::new(),
                order: Vec::new(),
            }),
            max_images: max_images.max(1),
        }
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn insert(&self, image: Arc<LoadedImage>) {
        let mut inner = self.inner.write().await;
        let id = image.id.clone();

        if inner.images.remove(&id).is_some() {
            inner.order.retain(|k| k != &id);
        }

        while inner.images.len() >= self.max_images && !inner.order.is_empty() {
            let oldest = inner.order.remove(0);
            inner.images.remove(&oldest);
            tracing::debug!(image_id = %oldest, "Image store: evicted least recently used image");
        }

        inner.images.insert(id.clone(), image);
        inner.order.push(id);
    }

    async fn get(&self, id: &ImageId) -> Option<Arc<LoadedImage>> {
        let mut inner = self.inner.write().await;
        let image = inner.images.get(id).cloned()?;

        inner.order.retain(|k| k != id);
        inner.order.push(id.clone());
        Some(image)
    }

    async fn len(&self) -> usize {
        self.inner.read().await.images.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn image(url: &str) -> Arc<LoadedImage> {
        Arc::new(LoadedImage::new(
            url,
            RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])),
            800,
            650,
        ))
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryImageStore::new(4);
        let img = image("https://example.com/a.png");
        store.insert(img.clone()).await;

        let found = store.get(&img.id).await.unwrap();
        assert_eq!(found.url, "https://example.com/a.png");
        assert!(store.get(&ImageId::new("missing")).await.is_none());
    }

    #[tokio::test]
    async fn test_reinsert_replaces() {
        let store = InMemoryImageStore::new(4);
        store.insert(image("https://example.com/a.png")).await;
        store.insert(image("https://example.com/a.png")).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_reinsert_when_full_keeps_others() {
        let store = InMemoryImageStore::new(2);
        let a = image("https://example.com/a.png");
        let b = image("https://example.com/b.png");

        store.insert(a.clone()).await;
        store.insert(b.clone()).await;
        store.insert(image("https://example.com/b.png")).await;

        assert_eq!(store.len().await, 2);
        assert!(store.get(&a.id).await.is_some());
    }

    #[tokio::test]
    async fn test_evicts_least_recently_used() {
        let store = InMemoryImageStore::new(2);
        let a = image("https://example.com/a.png");
        let b = image("https://example.com/b.png");
        let c = image("https://example.com/c.png");

        store.insert(a.clone()).await;
        store.insert(b.clone()).await;
        // Touch a so b becomes the eviction candidate
        assert!(store.get(&a.id).await.is_some());
        store.insert(c.clone()).await;

        assert_eq!(store.len().await, 2);
        assert!(store.get(&a.id).await.is_some());
        assert!(store.get(&b.id).await.is_none());
        assert!(store.get(&c.id).await.is_some());
    }
}
