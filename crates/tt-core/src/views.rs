use serde::{Deserialize, Serialize};

/// One of the four canonical camera angles of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKey {
    Front,
    Right,
    Back,
    Left,
}

impl ViewKey {
    /// Display order used everywhere in the UI
    pub const ALL: [ViewKey; 4] = [Self::Front, Self::Right, Self::Back, Self::Left];

    /// Label shown under thumbnails
    pub fn label(&self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Right => "Right",
            Self::Back => "Back",
            Self::Left => "Left",
        }
    }

    /// Key used in the API payload
    pub fn id(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Right => "right",
            Self::Back => "back",
            Self::Left => "left",
        }
    }
}

/// Image URLs for the four side views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SideViews {
    pub front: String,
    pub right: String,
    pub back: String,
    pub left: String,
}

impl SideViews {
    pub fn get(&self, key: ViewKey) -> &str {
        match key {
            ViewKey::Front => &self.front,
            ViewKey::Right => &self.right,
            ViewKey::Back => &self.back,
            ViewKey::Left => &self.left,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewKey, &str)> {
        ViewKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_follows_display_order() {
        // Keys deliberately shuffled in the payload
        let views: SideViews = serde_json::from_str(
            r#"{"left":"d.png","back":"c.png","front":"a.png","right":"b.png"}"#,
        ).unwrap();

        let collected: Vec<_> = views.iter().collect();
        assert_eq!(collected, vec![
            (ViewKey::Front, "a.png"),
            (ViewKey::Right, "b.png"),
            (ViewKey::Back, "c.png"),
            (ViewKey::Left, "d.png"),
        ]);
    }

    #[test]
    fn test_labels_and_ids() {
        let labels: Vec<_> = ViewKey::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, ["Front", "Right", "Back", "Left"]);
        assert_eq!(ViewKey::Back.id(), "back");
    }
}
