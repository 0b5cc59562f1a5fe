use glam::Vec3;
use crate::views::ViewKey;

const DEFAULT_DISTANCE: f32 = 5.0;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 20.0;
const FOV_Y_DEG: f32 = 50.0;
const DRAG_DEG_PER_PIXEL: f32 = 0.5;
const ZOOM_STEP: f32 = 0.01;
/// Matches an orbit that completes in 30 seconds
pub const AUTO_ROTATE_DEG_PER_SEC: f32 = 12.0;
/// Edge length of the square billboard in world units
pub const QUAD_SIZE: f32 = 3.0;

/// Map a yaw angle in degrees to the side view facing the camera.
///
/// Each bucket is half-open and starts at its lower boundary, so 45° is
/// `Right`, 135° is `Back`, 225° is `Left` and 315° is `Front`.
pub fn bucket(angle_degrees: f32) -> ViewKey {
    let degrees = angle_degrees.rem_euclid(360.0);

    if degrees >= 315.0 || degrees < 45.0 {
        ViewKey::Front
    } else if degrees < 135.0 {
        ViewKey::Right
    } else if degrees < 225.0 {
        ViewKey::Back
    } else {
        ViewKey::Left
    }
}

/// Camera orbiting the billboard around the vertical axis
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    yaw_deg: f32,
    distance: f32,
    auto_rotate: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw_deg: 0.0,
            distance: DEFAULT_DISTANCE,
            auto_rotate: false,
        }
    }
}

impl OrbitCamera {
    /// Yaw normalized to [0, 360)
    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_deg.rem_euclid(360.0)
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn eye(&self) -> Vec3 {
        let yaw = self.yaw_deg.to_radians();
        self.target + Vec3::new(yaw.sin(), 0.0, yaw.cos()) * self.distance
    }

    pub fn set_yaw(&mut self, degrees: f32) -> bool {
        let degrees = degrees.rem_euclid(360.0);
        let changed = degrees != self.yaw_deg;
        self.yaw_deg = degrees;
        changed
    }

    /// Horizontal drag in screen pixels
    pub fn drag(&mut self, dx: f32) -> bool {
        if dx == 0.0 {
            return false;
        }
        self.set_yaw(self.yaw_deg + dx * DRAG_DEG_PER_PIXEL)
    }

    /// Positive scroll moves the camera closer
    pub fn zoom(&mut self, scroll: f32) -> bool {
        let distance = (self.distance * (1.0 - scroll * ZOOM_STEP)).clamp(MIN_DISTANCE, MAX_DISTANCE);
        let changed = distance != self.distance;
        self.distance = distance;
        changed
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Advance auto-rotation by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.auto_rotate || dt <= 0.0 {
            return false;
        }
        self.set_yaw(self.yaw_deg + AUTO_ROTATE_DEG_PER_SEC * dt)
    }
}

/// Flat billboard that swaps between the four side views as the camera orbits
#[derive(Debug, Clone)]
pub struct SpriteViewer {
    pub camera: OrbitCamera,
    bound: ViewKey,
}

impl Default for SpriteViewer {
    fn default() -> Self {
        let camera = OrbitCamera::default();
        let bound = bucket(camera.yaw_degrees());
        Self { camera, bound }
    }
}

impl SpriteViewer {
    /// View whose texture is currently bound to the billboard
    pub fn current(&self) -> ViewKey {
        self.bound
    }

    /// Recompute the bucket after a camera change.
    ///
    /// Returns the new view only when the bound texture has to change.
    pub fn sync(&mut self) -> Option<ViewKey> {
        let key = bucket(self.camera.yaw_degrees());
        if key == self.bound {
            return None;
        }
        self.bound = key;
        Some(key)
    }

    /// Share of the viewport height covered by the billboard
    pub fn quad_screen_fraction(&self) -> f32 {
        let distance = self.camera.eye().distance(self.camera.target);
        let half_fov = (FOV_Y_DEG.to_radians() / 2.0).tan();
        QUAD_SIZE / (2.0 * distance * half_fov)
    }

    pub fn reset(&mut self) {
        let auto_rotate = self.camera.auto_rotate();
        *self = Self::default();
        self.camera.set_auto_rotate(auto_rotate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_table() {
        assert_eq!(bucket(0.0), ViewKey::Front);
        assert_eq!(bucket(44.9), ViewKey::Front);
        assert_eq!(bucket(90.0), ViewKey::Right);
        assert_eq!(bucket(180.0), ViewKey::Back);
        assert_eq!(bucket(270.0), ViewKey::Left);
        assert_eq!(bucket(359.9), ViewKey::Front);
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(bucket(45.0), ViewKey::Right);
        assert_eq!(bucket(135.0), ViewKey::Back);
        assert_eq!(bucket(225.0), ViewKey::Left);
        assert_eq!(bucket(315.0), ViewKey::Front);
    }

    #[test]
    fn test_bucket_normalizes() {
        assert_eq!(bucket(-90.0), ViewKey::Left);
        assert_eq!(bucket(360.0), ViewKey::Front);
        assert_eq!(bucket(450.0), ViewKey::Right);
        assert_eq!(bucket(-225.0), ViewKey::Back);
    }

    #[test]
    fn test_drag_and_auto_rotate_share_state() {
        let mut viewer = SpriteViewer::default();
        assert_eq!(viewer.current(), ViewKey::Front);

        // 180px of drag is 90 degrees
        assert!(viewer.camera.drag(180.0));
        assert_eq!(viewer.sync(), Some(ViewKey::Right));

        viewer.camera.set_auto_rotate(true);
        // 7.5s at 12 deg/s is another 90 degrees
        assert!(viewer.camera.advance(7.5));
        assert_eq!(viewer.camera.yaw_degrees(), 180.0);
        assert_eq!(viewer.sync(), Some(ViewKey::Back));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut viewer = SpriteViewer::default();
        viewer.camera.set_yaw(100.0);
        assert_eq!(viewer.sync(), Some(ViewKey::Right));
        assert_eq!(viewer.sync(), None);

        viewer.camera.set_yaw(120.0);
        assert_eq!(viewer.sync(), None);
        assert_eq!(viewer.current(), ViewKey::Right);
    }

    #[test]
    fn test_advance_without_auto_rotate() {
        let mut camera = OrbitCamera::default();
        assert!(!camera.advance(1.0));
        assert_eq!(camera.yaw_degrees(), 0.0);
    }

    #[test]
    fn test_negative_drag_wraps() {
        let mut camera = OrbitCamera::default();
        camera.drag(-180.0);
        assert_eq!(camera.yaw_degrees(), 270.0);
        assert_eq!(bucket(camera.yaw_degrees()), ViewKey::Left);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewer = SpriteViewer::default();
        let before = viewer.quad_screen_fraction();
        assert!(viewer.camera.zoom(50.0));
        assert!(viewer.quad_screen_fraction() > before);

        for _ in 0..100 {
            viewer.camera.zoom(-100.0);
        }
        assert_eq!(viewer.camera.distance(), MAX_DISTANCE);
        assert!(!viewer.camera.zoom(-100.0));
    }

    #[test]
    fn test_eye_orbits_target() {
        let mut camera = OrbitCamera::default();
        camera.set_yaw(90.0);
        let eye = camera.eye();
        assert!((eye.x - DEFAULT_DISTANCE).abs() < 1e-4);
        assert!(eye.z.abs() < 1e-4);
    }
}
