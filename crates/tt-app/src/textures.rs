use std::collections::HashMap;
use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use image::RgbaImage;
use log::debug;
use uuid::Uuid;

#[derive(Clone)]
pub enum TextureSlot {
    Pending,
    Ready(TextureHandle),
    Failed(String),
}

/// Side-view textures keyed by the URL they were downloaded from.
///
/// Slots belong to one submission; downloads tagged with any other
/// submission id are dropped.
#[derive(Default)]
pub struct TextureStore {
    submission: Option<Uuid>,
    slots: HashMap<String, TextureSlot>,
}

impl TextureStore {
    /// Forget every slot and only accept downloads for `submission` from now on
    pub fn begin(&mut self, submission: Uuid) {
        self.submission = Some(submission);
        self.slots.clear();
    }

    fn accepts(&self, submission: Uuid, url: &str) -> bool {
        if self.submission != Some(submission) {
            debug!("Dropping {} from stale submission {}", url, submission);
            return false;
        }
        true
    }

    /// Returns false if the URL is already known, so each URL is fetched once
    pub fn mark_pending(&mut self, url: &str) -> bool {
        if self.slots.contains_key(url) {
            return false;
        }
        self.slots.insert(url.to_string(), TextureSlot::Pending);
        true
    }

    pub fn insert_image(
        &mut self,
        ctx: &Context,
        submission: Uuid,
        url: &str,
        image: &RgbaImage,
    ) -> Option<TextureHandle> {
        if !self.accepts(submission, url) {
            return None;
        }
        if let Some(TextureSlot::Ready(handle)) = self.slots.get(url) {
            return Some(handle.clone());
        }

        let size = [image.width() as usize, image.height() as usize];
        let color_image = ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        let handle = ctx.load_texture(url, color_image, TextureOptions::LINEAR);

        self.slots.insert(url.to_string(), TextureSlot::Ready(handle.clone()));
        Some(handle)
    }

    pub fn insert_failed(&mut self, submission: Uuid, url: &str, reason: String) {
        if self.accepts(submission, url) {
            self.slots.insert(url.to_string(), TextureSlot::Failed(reason));
        }
    }

    pub fn get(&self, url: &str) -> Option<&TextureSlot> {
        self.slots.get(url)
    }

    pub fn texture(&self, url: &str) -> Option<&TextureHandle> {
        match self.slots.get(url) {
            Some(TextureSlot::Ready(handle)) => Some(handle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_then_ready() {
        let ctx = Context::default();
        let id = Uuid::new_v4();
        let mut store = TextureStore::default();
        store.begin(id);

        assert!(store.mark_pending("a.png"));
        assert!(!store.mark_pending("a.png"));
        assert!(matches!(store.get("a.png"), Some(TextureSlot::Pending)));
        assert!(store.texture("a.png").is_none());

        let image = RgbaImage::new(3, 2);
        let first = store.insert_image(&ctx, id, "a.png", &image).unwrap();
        let second = store.insert_image(&ctx, id, "a.png", &image).unwrap();
        // Uploaded once, reused afterwards
        assert_eq!(first.id(), second.id());
        assert_eq!(store.texture("a.png").map(|t| t.size()), Some([3, 2]));
    }

    #[test]
    fn test_failed_and_begin_clears() {
        let id = Uuid::new_v4();
        let mut store = TextureStore::default();
        store.begin(id);
        store.mark_pending("b.png");
        store.insert_failed(id, "b.png", "404".into());
        assert!(matches!(store.get("b.png"), Some(TextureSlot::Failed(r)) if r == "404"));

        store.begin(Uuid::new_v4());
        assert!(store.get("b.png").is_none());
    }

    #[test]
    fn test_late_download_from_previous_submission_is_dropped() {
        let ctx = Context::default();
        let (old, new) = (Uuid::new_v4(), Uuid::new_v4());
        let mut store = TextureStore::default();

        store.begin(old);
        assert!(store.mark_pending("/static/front.png"));

        // A new submission starts before the old download lands
        store.begin(new);
        assert!(store.insert_image(&ctx, old, "/static/front.png", &RgbaImage::new(7, 7)).is_none());
        store.insert_failed(old, "/static/back.png", "timeout".into());
        assert!(store.get("/static/front.png").is_none());
        assert!(store.get("/static/back.png").is_none());

        // Same URL in the new result is fetched again and gets its own image
        assert!(store.mark_pending("/static/front.png"));
        store.insert_image(&ctx, new, "/static/front.png", &RgbaImage::new(2, 2));
        assert_eq!(store.texture("/static/front.png").map(|t| t.size()), Some([2, 2]));
    }
}
