//! Procedural level: the live window of platforms around the camera
//!
//! Platforms are kept in spawn order, which is also bottom-to-top order; the
//! last one is the frontier. All random draws come from the level's own
//! seeded generator, so a seed fully determines the platform sequence.

use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::platform::{Platform, PlatformKind, PowerUp, PowerUpKind};
use super::rect::Rect;
use crate::error::{ConfigError, ConfigResult};
use crate::tuning::Tuning;

/// Live platform window plus the generator that extends it
#[derive(Debug, Clone)]
pub struct Level {
    /// Bottom-to-top; the last entry is the frontier
    pub platforms: Vec<Platform>,
    rng: Pcg32,
    /// Horizontal center of new platforms
    center_dist: Normal<f32>,
    /// Index into normal / disappearing / moving
    kind_dist: WeightedIndex<f32>,
    next_id: u32,
}

impl Level {
    /// Create a level seeded from `seed`, holding only the starting platform
    pub fn new(seed: u64, tuning: &Tuning) -> ConfigResult<Self> {
        Self::from_rng(Pcg32::seed_from_u64(seed), tuning)
    }

    /// Create a level drawing from an explicit generator
    pub fn from_rng(rng: Pcg32, tuning: &Tuning) -> ConfigResult<Self> {
        tuning.validate()?;
        let center_dist = Normal::new(tuning.screen_center_x(), tuning.platform_spread).map_err(
            |e| ConfigError::Distribution {
                name: "platform_spread",
                reason: e.to_string(),
            },
        )?;
        let kind_dist = WeightedIndex::new(tuning.platform_weights).map_err(|e| {
            ConfigError::Distribution {
                name: "platform_weights",
                reason: e.to_string(),
            }
        })?;

        let mut level = Self {
            platforms: Vec::with_capacity(tuning.min_live_platforms * 2),
            rng,
            center_dist,
            kind_dist,
            next_id: 0,
        };
        level.push_start_platform(tuning.screen_height - tuning.start_platform_margin, tuning);
        Ok(level)
    }

    /// Highest (most recently generated) platform
    pub fn frontier(&self) -> Option<&Platform> {
        self.platforms.last()
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Plain platform centered horizontally with its top at `top`
    fn push_start_platform(&mut self, top: f32, tuning: &Tuning) {
        let id = self.next_entity_id();
        let width = tuning.start_platform_width.min(tuning.screen_width);
        let rect = Rect::new(
            tuning.screen_center_x() - width / 2.0,
            top,
            width,
            tuning.platform_height,
        );
        self.platforms.push(Platform::new(id, rect, PlatformKind::Normal));
    }

    /// Spawn one platform above the frontier
    pub fn generate_next(&mut self, tuning: &Tuning) {
        let Some(last_top) = self.frontier().map(|p| p.rect.top()) else {
            return;
        };

        let width = self
            .rng
            .random_range(tuning.platform_min_width..=tuning.platform_max_width);
        let center = self.center_dist.sample(&mut self.rng);
        let x = (center - width / 2.0).clamp(0.0, tuning.screen_width - width);
        let gap = self
            .rng
            .random_range(tuning.min_platform_gap..=tuning.max_platform_gap);
        let kind = PlatformKind::from_index(self.kind_dist.sample(&mut self.rng));

        let id = self.next_entity_id();
        let rect = Rect::new(x, last_top - gap, width, tuning.platform_height);
        let mut platform = Platform::new(id, rect, kind);

        if self.rng.random_bool(tuning.power_up_spawn_chance) {
            platform = platform.with_power_up(PowerUp::new(
                PowerUpKind::HighJump,
                tuning.power_up_size,
                tuning.power_up_gap,
            ));
            log::debug!("Platform {} spawned with a power-up", id);
        }

        log::trace!(
            "Spawned {} platform {} at ({:.1}, {:.1}) width {:.1}",
            kind.as_str(),
            id,
            rect.left(),
            rect.top(),
            width
        );
        self.platforms.push(platform);
    }

    /// A platform whose bottom edge is at or above this world y is culled
    #[inline]
    pub fn cull_line(camera: &Camera, tuning: &Tuning) -> f32 {
        camera.y - tuning.screen_height
    }

    /// A platform whose top edge is below this world y can no longer be
    /// reached and is culled
    #[inline]
    pub fn trail_line(camera: &Camera, tuning: &Tuning) -> f32 {
        camera.y + 2.0 * tuning.screen_height
    }

    /// The generator keeps adding while the frontier's top is above this y
    #[inline]
    pub fn spawn_line(camera: &Camera, tuning: &Tuning) -> f32 {
        camera.y + tuning.screen_height
    }

    /// True while the window is short of platforms or the frontier is
    /// still above the bottom of the viewport
    pub fn needs_platform(&self, camera: &Camera, tuning: &Tuning) -> bool {
        match self.frontier() {
            Some(frontier) => {
                self.platforms.len() < tuning.min_live_platforms
                    || frontier.rect.top() < Self::spawn_line(camera, tuning)
            }
            None => true,
        }
    }

    /// Per-frame maintenance: cull, advance platform state, add at most one
    /// platform
    pub fn update(&mut self, camera: &Camera, tuning: &Tuning) {
        let cull_line = Self::cull_line(camera, tuning);
        let trail_line = Self::trail_line(camera, tuning);
        let before = self.platforms.len();
        self.platforms
            .retain(|p| p.rect.bottom() > cull_line && p.rect.top() <= trail_line);
        let culled = before - self.platforms.len();
        if culled > 0 {
            log::trace!(
                "Culled {} platforms outside ({:.1}, {:.1}]",
                culled,
                cull_line,
                trail_line
            );
        }

        for platform in &mut self.platforms {
            platform.update(tuning);
        }

        if self.platforms.is_empty() {
            // Everything was culled; re-anchor near the bottom of the viewport.
            let top = camera.y + tuning.screen_height - tuning.start_platform_margin;
            self.push_start_platform(top, tuning);
            log::debug!("Level re-anchored at y={:.1}", top);
        } else if self.needs_platform(camera, tuning) {
            self.generate_next(tuning);
            // A platform spawned past the cull line is dropped right away and
            // redrawn from the same frontier next frame.
            if self.platforms.len() > 1
                && self
                    .frontier()
                    .is_some_and(|p| p.rect.bottom() <= cull_line)
            {
                self.platforms.pop();
            }
        }
    }
}
