//! Upward-only vertical camera

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Vertical scroll state; there is no horizontal scrolling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World y of the top of the viewport. Never increases.
    pub y: f32,
    /// Distance kept between the viewport top and the player's top edge
    pub player_offset: f32,
}

impl Camera {
    pub fn new(player_offset: f32) -> Self {
        Self {
            y: 0.0,
            player_offset,
        }
    }

    /// Follow the player up; never scroll back down
    pub fn update(&mut self, player_top: f32) {
        let target = player_top - self.player_offset;
        self.y = self.y.min(target);
    }

    /// Map a world-space box into screen space
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect {
            pos: Vec2::new(rect.pos.x, rect.pos.y - self.y),
            size: rect.size,
        }
    }

    /// Screen-space y of a world y
    #[inline]
    pub fn screen_y(&self, world_y: f32) -> f32 {
        world_y - self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_follows_player_up() {
        let mut camera = Camera::new(300.0);
        camera.update(100.0);
        assert_eq!(camera.y, -200.0);
    }

    #[test]
    fn test_ignores_player_below_target() {
        let mut camera = Camera::new(300.0);
        camera.update(500.0);
        assert_eq!(camera.y, 0.0);
    }

    #[test]
    fn test_apply_shifts_only_vertically() {
        let camera = Camera {
            y: -250.0,
            player_offset: 300.0,
        };
        let screen = camera.apply(Rect::new(40.0, -200.0, 10.0, 20.0));
        assert_eq!(screen, Rect::new(40.0, 50.0, 10.0, 20.0));
    }

    proptest! {
        #[test]
        fn camera_never_moves_down(tops in prop::collection::vec(-10_000.0f32..10_000.0, 1..64)) {
            let mut camera = Camera::new(300.0);
            let mut last = camera.y;
            for top in tops {
                camera.update(top);
                prop_assert!(camera.y <= last);
                last = camera.y;
            }
        }
    }
}
