//! Frame drawing through a host-supplied canvas
//!
//! The simulation never touches a window. The host implements [`Canvas`]
//! (a single filled-rectangle primitive in screen space) and calls
//! [`draw_frame`] once per frame after ticking.

use crate::sim::platform::{PlatformKind, PowerUpKind};
use crate::sim::rect::Rect;
use crate::sim::state::GameState;

/// Linear RGBA, 0.0 - 1.0
pub type Color = [f32; 4];

pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = [0.06, 0.07, 0.12, 1.0];
    pub const PLAYER: Color = [0.95, 0.35, 0.3, 1.0];
    pub const PLATFORM: Color = [0.3, 0.8, 0.4, 1.0];
    pub const DISAPPEARING_PLATFORM: Color = [0.85, 0.75, 0.3, 1.0];
    pub const MOVING_PLATFORM: Color = [0.35, 0.55, 0.95, 1.0];
    pub const HIGH_JUMP: Color = [0.8, 0.4, 0.95, 1.0];
}

/// Host drawing primitive
pub trait Canvas {
    /// Fill `rect` (screen space) with `color`
    fn draw_rect(&mut self, color: Color, rect: Rect);
}

/// A recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub color: Color,
    pub rect: Rect,
}

/// Record draw calls instead of executing them (headless runs, tests)
impl Canvas for Vec<DrawCommand> {
    fn draw_rect(&mut self, color: Color, rect: Rect) {
        self.push(DrawCommand { color, rect });
    }
}

pub fn platform_color(kind: &PlatformKind) -> Color {
    match kind {
        PlatformKind::Normal => palette::PLATFORM,
        PlatformKind::Disappearing(_) => palette::DISAPPEARING_PLATFORM,
        PlatformKind::Moving(_) => palette::MOVING_PLATFORM,
    }
}

pub fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::HighJump => palette::HIGH_JUMP,
    }
}

/// Width of the highlight around a boosted player
const HIGH_JUMP_AURA: f32 = 2.0;

/// Draw background, platforms, power-ups and the player, back to front
pub fn draw_frame(state: &GameState, canvas: &mut impl Canvas) {
    let viewport = Rect::new(0.0, 0.0, state.tuning.screen_width, state.tuning.screen_height);
    canvas.draw_rect(palette::BACKGROUND, viewport);

    let camera = &state.camera;
    let mut draw_world = |color: Color, world: Rect| {
        let screen = camera.apply(world);
        if screen.overlaps(&viewport) {
            canvas.draw_rect(color, screen);
        }
    };

    for platform in &state.level.platforms {
        if !platform.is_visible() {
            continue;
        }
        draw_world(platform_color(&platform.kind), platform.rect);
        if let (Some(power_up), Some(rect)) = (&platform.power_up, platform.active_power_up_rect()) {
            draw_world(power_up_color(power_up.kind), rect);
        }
    }

    let player = &state.player;
    if player.high_jump_active {
        draw_world(palette::HIGH_JUMP, player.rect.inflate(HIGH_JUMP_AURA));
    }
    draw_world(palette::PLAYER, player.rect);
}
