use crate::views::{SideViews, ViewKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumbnail<'a> {
    pub key: ViewKey,
    pub label: &'static str,
    pub url: &'a str,
}

/// What a click inside the lightbox overlay landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxTarget {
    Background,
    Image,
    CloseButton,
}

/// Thumbnail grid plus the enlarged-view selection.
///
/// The selection is kept as a [`ViewKey`] rather than a URL so it can never
/// outlive the result it was taken from: callers `dismiss` it whenever a new
/// result arrives.
#[derive(Debug, Default, Clone)]
pub struct Gallery {
    selection: Option<ViewKey>,
}

impl Gallery {
    pub fn thumbnails(views: &SideViews) -> [Thumbnail<'_>; 4] {
        ViewKey::ALL.map(|key| Thumbnail {
            key,
            label: key.label(),
            url: views.get(key),
        })
    }

    pub fn select(&mut self, key: ViewKey) {
        self.selection = Some(key);
    }

    pub fn dismiss(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<ViewKey> {
        self.selection
    }

    pub fn is_open(&self) -> bool {
        self.selection.is_some()
    }

    pub fn selected_url<'a>(&self, views: &'a SideViews) -> Option<&'a str> {
        self.selection.map(|key| views.get(key))
    }

    /// Returns true when the click closed the lightbox
    pub fn on_lightbox_click(&mut self, target: LightboxTarget) -> bool {
        match target {
            LightboxTarget::Image => false,
            LightboxTarget::Background | LightboxTarget::CloseButton => {
                let was_open = self.is_open();
                self.dismiss();
                was_open
            }
        }
    }

    pub fn on_escape(&mut self) -> bool {
        self.on_lightbox_click(LightboxTarget::CloseButton)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn views() -> SideViews {
        SideViews {
            front: "a.png".into(),
            right: "b.png".into(),
            back: "c.png".into(),
            left: "d.png".into(),
        }
    }

    #[test]
    fn test_thumbnails_fixed_order() {
        let views = views();
        let thumbs = Gallery::thumbnails(&views);
        let labels: Vec<_> = thumbs.iter().map(|t| (t.label, t.url)).collect();
        assert_eq!(labels, vec![
            ("Front", "a.png"),
            ("Right", "b.png"),
            ("Back", "c.png"),
            ("Left", "d.png"),
        ]);
    }

    #[test]
    fn test_select_is_idempotent() {
        let views = views();
        let mut gallery = Gallery::default();
        assert!(!gallery.is_open());

        gallery.select(ViewKey::Back);
        gallery.select(ViewKey::Back);
        assert!(gallery.is_open());
        assert_eq!(gallery.selected_url(&views), Some("c.png"));
    }

    #[test]
    fn test_image_click_keeps_lightbox_open() {
        let mut gallery = Gallery::default();
        gallery.select(ViewKey::Front);

        assert!(!gallery.on_lightbox_click(LightboxTarget::Image));
        assert_eq!(gallery.selection(), Some(ViewKey::Front));

        assert!(gallery.on_lightbox_click(LightboxTarget::Background));
        assert!(!gallery.is_open());
    }

    #[test]
    fn test_close_button_and_escape() {
        let mut gallery = Gallery::default();
        gallery.select(ViewKey::Left);
        assert!(gallery.on_lightbox_click(LightboxTarget::CloseButton));

        gallery.select(ViewKey::Right);
        assert!(gallery.on_escape());
        // Nothing left to close
        assert!(!gallery.on_escape());
    }

    #[test]
    fn test_dismiss_clears_selection() {
        let mut gallery = Gallery::default();
        gallery.select(ViewKey::Right);
        gallery.dismiss();
        assert_eq!(gallery.selection(), None);
    }
}
