//! Platforms and the power-ups they carry

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Timed jump-force multiplier plus a flat score bonus
    HighJump,
}

/// A power-up resting on top of its platform
///
/// Position is not stored: it is derived from the owning platform's box, so
/// it follows moving platforms without extra bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Cleared on pickup; inactive power-ups neither draw nor collide
    pub active: bool,
    pub size: f32,
    /// Clearance above the platform top
    pub gap: f32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, size: f32, gap: f32) -> Self {
        Self {
            kind,
            active: true,
            size,
            gap,
        }
    }

    /// World box when resting on `platform`: centered, `gap` above its top
    pub fn rect_on(&self, platform: &Rect) -> Rect {
        Rect::new(
            platform.center_x() - self.size / 2.0,
            platform.top() - self.size - self.gap,
            self.size,
            self.size,
        )
    }
}

/// Disappearing platform cycle
///
/// One counter runs at a time, so "counting down" and "hidden" can never
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Fade {
    /// Visible, not yet stepped on
    #[default]
    Idle,
    /// Visible, counting up toward the disappear delay
    Countdown(u32),
    /// Hidden, counting up toward the reappear delay
    Hidden(u32),
}

/// Moving platform oscillation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sway {
    /// Horizontal offset from the spawn x
    pub progress: f32,
    /// +1.0 or -1.0
    pub direction: f32,
}

impl Default for Sway {
    fn default() -> Self {
        Self {
            progress: 0.0,
            direction: 1.0,
        }
    }
}

/// Platform variants with their per-variant state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    Disappearing(Fade),
    Moving(Sway),
}

impl PlatformKind {
    /// Fresh variant for a weighted-choice index (normal, disappearing, moving)
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => PlatformKind::Disappearing(Fade::Idle),
            2 => PlatformKind::Moving(Sway::default()),
            _ => PlatformKind::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKind::Normal => "normal",
            PlatformKind::Disappearing(_) => "disappearing",
            PlatformKind::Moving(_) => "moving",
        }
    }
}

/// A platform entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
    /// Spawn position (top-left); never changes
    pub origin: Vec2,
    pub kind: PlatformKind,
    pub power_up: Option<PowerUp>,
}

impl Platform {
    pub fn new(id: u32, rect: Rect, kind: PlatformKind) -> Self {
        Self {
            id,
            rect,
            origin: rect.pos,
            kind,
            power_up: None,
        }
    }

    pub fn with_power_up(mut self, power_up: PowerUp) -> Self {
        self.power_up = Some(power_up);
        self
    }

    /// Hidden disappearing platforms are skipped by collision and drawing
    pub fn is_visible(&self) -> bool {
        !matches!(self.kind, PlatformKind::Disappearing(Fade::Hidden(_)))
    }

    /// Frames counted since the platform was stepped on (0 when idle or hidden)
    pub fn disappear_timer(&self) -> u32 {
        match self.kind {
            PlatformKind::Disappearing(Fade::Countdown(t)) => t,
            _ => 0,
        }
    }

    /// Frames counted while hidden (0 when visible)
    pub fn reappear_timer(&self) -> u32 {
        match self.kind {
            PlatformKind::Disappearing(Fade::Hidden(t)) => t,
            _ => 0,
        }
    }

    /// Player landed on this platform: arm a disappearing platform's countdown
    pub fn step_on(&mut self) {
        if let PlatformKind::Disappearing(fade) = &mut self.kind {
            if !matches!(fade, Fade::Hidden(_)) {
                *fade = Fade::Countdown(1);
            }
        }
    }

    /// World box of the carried power-up, if it is still active
    pub fn active_power_up_rect(&self) -> Option<Rect> {
        self.power_up
            .as_ref()
            .filter(|p| p.active)
            .map(|p| p.rect_on(&self.rect))
    }

    /// Advance per-variant state by one frame
    pub fn update(&mut self, tuning: &Tuning) {
        match &mut self.kind {
            PlatformKind::Normal => {}
            PlatformKind::Disappearing(fade) => {
                *fade = match *fade {
                    Fade::Idle => Fade::Idle,
                    Fade::Countdown(t) => {
                        let t = t + 1;
                        if t >= tuning.disappear_delay {
                            Fade::Hidden(0)
                        } else {
                            Fade::Countdown(t)
                        }
                    }
                    Fade::Hidden(t) => {
                        let t = t + 1;
                        if t >= tuning.reappear_delay {
                            Fade::Idle
                        } else {
                            Fade::Hidden(t)
                        }
                    }
                };
            }
            PlatformKind::Moving(sway) => {
                sway.progress += tuning.moving_platform_speed * sway.direction;
                if sway.progress.abs() >= tuning.moving_platform_distance {
                    sway.direction = -sway.direction;
                }
                self.rect.pos.x = self.origin.x + sway.progress;
            }
        }
    }
}
