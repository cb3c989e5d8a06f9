//! Player physics, collision and scoring
//!
//! One call to [`Player::update`] is one frame. The stages run in a fixed
//! order and later stages read what earlier ones wrote:
//!
//! 1. input (horizontal accel/damping, fast-fall, jump or buffer it)
//! 2. high-jump timer decay
//! 3. gravity + explicit Euler step
//! 4. height scoring
//! 5. fall-distance tracking
//! 6. power-up pickup and platform landing (with auto-bounce)
//! 7. coyote-time decay
//! 8. buffered jump
//! 9. death checks
//! 10. horizontal wraparound

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::platform::{Platform, PowerUpKind};
use super::rect::Rect;
use super::tick::TickInput;
use crate::height_multiplier;
use crate::tuning::Tuning;

/// Result of a player update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Alive,
    Dead,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Fell more than three screen-heights since the last landing
    FellTooFar,
    /// Dropped below the bottom of the viewport
    LeftScreen,
}

/// The player-controlled box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,

    pub on_ground: bool,
    /// A horizontal direction is held
    pub is_moving: bool,
    pub fast_falling: bool,
    pub is_dead: bool,
    pub death_cause: Option<DeathCause>,

    /// Frames left on a buffered jump request
    pub jump_buffer: u32,
    /// Frames left in which a jump still counts as grounded
    pub coyote_time: u32,

    /// Downward displacement since `last_ground_y`
    pub fall_distance: f32,
    pub last_ground_y: f32,

    /// Smallest top edge reached (up is negative)
    pub highest_y: f32,
    /// Top edge at the last scoring event
    pub last_score_y: f32,
    pub score: u64,

    pub high_jump_active: bool,
    pub high_jump_timer: u32,
}

impl Player {
    /// Spawn at the center of the first screen
    pub fn new(tuning: &Tuning) -> Self {
        Self::spawn_at(
            tuning.screen_center_x() - tuning.player_width / 2.0,
            tuning.screen_height / 2.0,
            tuning,
        )
    }

    /// Spawn with the top-left corner at `(x, y)`
    pub fn spawn_at(x: f32, y: f32, tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(x, y, tuning.player_width, tuning.player_height),
            vel: Vec2::ZERO,
            on_ground: false,
            is_moving: false,
            fast_falling: false,
            is_dead: false,
            death_cause: None,
            jump_buffer: 0,
            coyote_time: 0,
            fall_distance: 0.0,
            last_ground_y: y,
            highest_y: y,
            last_score_y: y,
            score: 0,
            high_jump_active: false,
            high_jump_timer: 0,
        }
    }

    /// Launch velocity, boosted while a high jump is active
    pub fn jump_velocity(&self, tuning: &Tuning) -> f32 {
        if self.high_jump_active {
            tuning.jump_force * tuning.high_jump_multiplier
        } else {
            tuning.jump_force
        }
    }

    fn launch(&mut self, tuning: &Tuning) {
        self.vel.y = self.jump_velocity(tuning);
        self.on_ground = false;
        self.coyote_time = 0;
    }

    /// Advance one frame. Once dead, this is a no-op that keeps reporting
    /// [`PlayerStatus::Dead`].
    pub fn update(
        &mut self,
        input: &TickInput,
        platforms: &mut [Platform],
        camera: &Camera,
        tuning: &Tuning,
    ) -> PlayerStatus {
        if self.is_dead {
            return PlayerStatus::Dead;
        }

        self.handle_input(input, tuning);
        self.decay_high_jump();
        self.integrate(tuning);
        self.update_score(tuning);
        self.track_fall();
        self.resolve_collisions(platforms, tuning);

        if !self.on_ground {
            self.coyote_time = self.coyote_time.saturating_sub(1);
        }

        if self.jump_buffer > 0 {
            if self.on_ground {
                self.jump_buffer = 0;
                self.launch(tuning);
            } else {
                self.jump_buffer -= 1;
            }
        }

        if let Some(cause) = self.check_death(camera, tuning) {
            self.is_dead = true;
            self.death_cause = Some(cause);
            log::debug!(
                "Player died ({:?}) at y={:.1} with score {}",
                cause,
                self.rect.top(),
                self.score
            );
            return PlayerStatus::Dead;
        }

        self.wrap_horizontal(tuning);
        PlayerStatus::Alive
    }

    fn handle_input(&mut self, input: &TickInput, tuning: &Tuning) {
        if input.left {
            self.vel.x = (self.vel.x - tuning.player_acceleration).max(-tuning.player_speed);
            self.is_moving = true;
        } else if input.right {
            self.vel.x = (self.vel.x + tuning.player_acceleration).min(tuning.player_speed);
            self.is_moving = true;
        } else {
            self.vel.x *= tuning.player_friction;
            if self.vel.x.abs() < tuning.player_stop_epsilon {
                self.vel.x = 0.0;
            }
            self.is_moving = false;
        }

        self.fast_falling = input.down;

        if input.jump {
            if self.on_ground || self.coyote_time > 0 {
                self.launch(tuning);
            } else {
                self.jump_buffer = tuning.jump_buffer_frames;
            }
        }
    }

    fn decay_high_jump(&mut self) {
        if self.high_jump_active {
            self.high_jump_timer = self.high_jump_timer.saturating_sub(1);
            if self.high_jump_timer == 0 {
                self.high_jump_active = false;
            }
        }
    }

    fn integrate(&mut self, tuning: &Tuning) {
        let gravity = if self.fast_falling {
            tuning.gravity * tuning.fast_fall_multiplier
        } else {
            tuning.gravity
        };
        self.vel.y += gravity;
        self.rect.translate(self.vel);
    }

    fn update_score(&mut self, tuning: &Tuning) {
        let y = self.rect.top();
        if y < self.highest_y {
            self.highest_y = y;
            self.score += self.height_score(y, tuning);
        }
    }

    /// Points for climbing from `last_score_y` to `current_y`
    fn height_score(&mut self, current_y: f32, tuning: &Tuning) -> u64 {
        let climbed = self.last_score_y - current_y;
        if climbed <= 0.0 {
            return 0;
        }

        let multiplier = height_multiplier(
            self.height_level(current_y, tuning),
            tuning.height_score_multiplier,
            tuning.max_height_multiplier,
        );
        let points = (climbed * tuning.score_per_height_unit * multiplier).floor();
        self.last_score_y = current_y;

        if points > 0.0 { points as u64 } else { 0 }
    }

    /// Height bands between `highest_y` and `current_y`. Scoring runs after
    /// `highest_y` has ratcheted to the current height, so a scoring frame
    /// always sees band 0 and the multiplier stays at 1.
    pub fn height_level(&self, current_y: f32, tuning: &Tuning) -> u32 {
        let bands = ((self.highest_y - current_y) / tuning.height_score_interval).floor();
        if bands > 0.0 { bands as u32 } else { 0 }
    }

    fn track_fall(&mut self) {
        if self.on_ground {
            self.last_ground_y = self.rect.top();
            self.fall_distance = 0.0;
        } else {
            self.fall_distance = self.rect.top() - self.last_ground_y;
        }
    }

    fn resolve_collisions(&mut self, platforms: &mut [Platform], tuning: &Tuning) {
        self.on_ground = false;

        for platform in platforms.iter_mut() {
            self.try_pickup(platform, tuning);

            if !platform.is_visible() || !self.rect.overlaps(&platform.rect) {
                continue;
            }
            // One-way platforms: pass through while rising
            if self.vel.y < 0.0 {
                continue;
            }
            if self.vel.y > 0.0 {
                self.land_on(platform, tuning);
            }
        }
    }

    fn try_pickup(&mut self, platform: &mut Platform, tuning: &Tuning) {
        let Some(rect) = platform.active_power_up_rect() else {
            return;
        };
        if !self.rect.overlaps(&rect) {
            return;
        }
        if let Some(power_up) = platform.power_up.as_mut() {
            power_up.active = false;
            self.apply_power_up(power_up.kind, tuning);
            log::debug!("Picked up {:?} from platform {}", power_up.kind, platform.id);
        }
    }

    fn apply_power_up(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        match kind {
            PowerUpKind::HighJump => {
                self.high_jump_active = true;
                self.high_jump_timer = tuning.high_jump_duration;
                self.score += tuning.power_up_score_bonus;
            }
        }
    }

    /// Snap onto the platform top, then bounce straight back up.
    ///
    /// The bounce is unconditional: the player never rests on a platform.
    fn land_on(&mut self, platform: &mut Platform, tuning: &Tuning) {
        self.rect.set_bottom(platform.rect.top());
        self.vel.y = 0.0;
        self.on_ground = true;
        self.coyote_time = tuning.coyote_frames;
        self.last_ground_y = self.rect.top();
        self.fall_distance = 0.0;

        self.vel.y = self.jump_velocity(tuning);
        self.on_ground = false;

        platform.step_on();
    }

    fn check_death(&self, camera: &Camera, tuning: &Tuning) -> Option<DeathCause> {
        if self.fall_distance > tuning.screen_height * 3.0 {
            return Some(DeathCause::FellTooFar);
        }
        if camera.screen_y(self.rect.top()) > tuning.screen_height {
            return Some(DeathCause::LeftScreen);
        }
        None
    }

    /// The world is a horizontal cylinder
    fn wrap_horizontal(&mut self, tuning: &Tuning) {
        if self.rect.right() < 0.0 {
            self.rect.set_left(tuning.screen_width);
        } else if self.rect.left() > tuning.screen_width {
            self.rect.set_right(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SCREEN_HEIGHT;
    use crate::sim::platform::{Fade, PlatformKind, PowerUp};

    fn setup(x: f32, y: f32) -> (Player, Camera, Tuning) {
        let tuning = Tuning::default();
        let player = Player::spawn_at(x, y, &tuning);
        let camera = Camera::new(tuning.camera_player_offset);
        (player, camera, tuning)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_new_player_spawns_centered() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        assert!((player.rect.center_x() - tuning.screen_center_x()).abs() < 1e-4);
        assert_eq!(player.rect.top(), tuning.screen_height / 2.0);
        assert_eq!(player.score, 0);
    }

    #[test]
    fn test_free_fall_accumulates_gravity() {
        let (mut player, camera, tuning) = setup(100.0, 100.0);
        let mut expected_y = 100.0;
        for frame in 1..=10 {
            assert_eq!(
                player.update(&idle(), &mut [], &camera, &tuning),
                PlayerStatus::Alive
            );
            expected_y += frame as f32 * tuning.gravity;
        }
        assert!((player.vel.y - 5.0).abs() < 1e-5);
        assert!((player.rect.top() - expected_y).abs() < 1e-4);
        assert!((player.rect.top() - 127.5).abs() < 1e-4);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_fast_fall_scales_gravity() {
        let (mut player, camera, tuning) = setup(100.0, 100.0);
        let input = TickInput {
            down: true,
            ..Default::default()
        };
        player.update(&input, &mut [], &camera, &tuning);
        assert!(player.fast_falling);
        assert_eq!(player.vel.y, tuning.gravity * tuning.fast_fall_multiplier);

        player.update(&idle(), &mut [], &camera, &tuning);
        assert!(!player.fast_falling);
    }

    #[test]
    fn test_horizontal_acceleration_clamps() {
        let (mut player, camera, tuning) = setup(100.0, 100.0);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        player.update(&right, &mut [], &camera, &tuning);
        assert_eq!(player.vel.x, tuning.player_acceleration);
        assert!(player.is_moving);
        for _ in 0..30 {
            player.update(&right, &mut [], &camera, &tuning);
        }
        assert_eq!(player.vel.x, tuning.player_speed);
    }

    #[test]
    fn test_left_wins_when_both_held() {
        let (mut player, camera, tuning) = setup(100.0, 100.0);
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        player.update(&both, &mut [], &camera, &tuning);
        assert_eq!(player.vel.x, -tuning.player_acceleration);
    }

    #[test]
    fn test_horizontal_damping_snaps_to_zero() {
        let (mut player, camera, tuning) = setup(100.0, 100.0);
        player.vel.x = 5.0;
        player.update(&idle(), &mut [], &camera, &tuning);
        assert!((player.vel.x - 4.5).abs() < 1e-5);
        assert!(!player.is_moving);
        for _ in 0..40 {
            player.update(&idle(), &mut [], &camera, &tuning);
        }
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_jump_within_coyote_time() {
        let (mut player, camera, tuning) = setup(100.0, 100.0);
        player.coyote_time = 2;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        player.update(&jump, &mut [], &camera, &tuning);
        assert_eq!(player.vel.y, tuning.jump_force + tuning.gravity);
        assert_eq!(player.coyote_time, 0);
        assert_eq!(player.jump_buffer, 0);
    }

    #[test]
    fn test_airborne_jump_is_buffered_then_expires() {
        let (mut player, camera, tuning) = setup(100.0, 100.0);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        player.update(&jump, &mut [], &camera, &tuning);
        assert!(player.vel.y > 0.0);
        assert_eq!(player.jump_buffer, tuning.jump_buffer_frames - 1);

        for _ in 0..tuning.jump_buffer_frames {
            player.update(&idle(), &mut [], &camera, &tuning);
        }
        assert_eq!(player.jump_buffer, 0);
    }

    #[test]
    fn test_landing_bounces_immediately() {
        let (mut player, camera, tuning) = setup(100.0, 180.0);
        player.vel.y = 3.0;
        let mut platforms = [Platform::new(
            1,
            Rect::new(80.0, 200.0, 100.0, 15.0),
            PlatformKind::Normal,
        )];

        player.update(&idle(), &mut platforms, &camera, &tuning);

        // Auto-bounce: grounded for an instant, then relaunched.
        assert_eq!(player.rect.bottom(), 200.0);
        assert!(!player.on_ground);
        assert_eq!(player.vel.y, tuning.jump_force);
        assert!(player.vel.y < 0.0);
        assert_eq!(player.coyote_time, tuning.coyote_frames - 1);
        assert_eq!(player.last_ground_y, player.rect.top());
        assert_eq!(player.fall_distance, 0.0);
    }

    #[test]
    fn test_bounce_uses_high_jump_multiplier() {
        let (mut player, camera, tuning) = setup(100.0, 180.0);
        player.vel.y = 3.0;
        player.high_jump_active = true;
        player.high_jump_timer = 100;
        let mut platforms = [Platform::new(
            1,
            Rect::new(80.0, 200.0, 100.0, 15.0),
            PlatformKind::Normal,
        )];
        player.update(&idle(), &mut platforms, &camera, &tuning);
        assert_eq!(player.vel.y, tuning.jump_force * tuning.high_jump_multiplier);
    }

    #[test]
    fn test_rising_player_passes_through() {
        let (mut player, camera, tuning) = setup(100.0, 205.0);
        player.vel.y = -5.0;
        let mut platforms = [Platform::new(
            1,
            Rect::new(80.0, 200.0, 100.0, 15.0),
            PlatformKind::Normal,
        )];
        player.update(&idle(), &mut platforms, &camera, &tuning);
        assert_eq!(player.vel.y, -4.5);
        assert!((player.rect.top() - 200.5).abs() < 1e-5);
        assert_eq!(player.coyote_time, 0);
    }

    #[test]
    fn test_hidden_platform_does_not_collide() {
        let (mut player, camera, tuning) = setup(100.0, 180.0);
        player.vel.y = 3.0;
        let mut platforms = [Platform::new(
            1,
            Rect::new(80.0, 200.0, 100.0, 15.0),
            PlatformKind::Disappearing(Fade::Hidden(4)),
        )];
        player.update(&idle(), &mut platforms, &camera, &tuning);
        assert!(player.vel.y > 0.0);
    }

    #[test]
    fn test_landing_arms_disappearing_platform() {
        let (mut player, camera, tuning) = setup(100.0, 180.0);
        player.vel.y = 3.0;
        let mut platforms = [Platform::new(
            1,
            Rect::new(80.0, 200.0, 100.0, 15.0),
            PlatformKind::Disappearing(Fade::Idle),
        )];
        player.update(&idle(), &mut platforms, &camera, &tuning);
        assert_eq!(platforms[0].disappear_timer(), 1);
        assert!(platforms[0].is_visible());
    }

    #[test]
    fn test_power_up_pickup() {
        let (mut player, camera, tuning) = setup(115.0, 160.0);
        let mut platforms = [Platform::new(
            1,
            Rect::new(80.0, 200.0, 100.0, 15.0),
            PlatformKind::Normal,
        )
        .with_power_up(PowerUp::new(PowerUpKind::HighJump, 20.0, 5.0))];

        player.update(&idle(), &mut platforms, &camera, &tuning);

        assert!(player.high_jump_active);
        assert_eq!(player.high_jump_timer, tuning.high_jump_duration);
        assert_eq!(player.score, tuning.power_up_score_bonus);
        let power_up = platforms[0].power_up.as_ref().unwrap();
        assert!(!power_up.active);

        // Consumed: no second bonus
        player.update(&idle(), &mut platforms, &camera, &tuning);
        assert_eq!(player.score, tuning.power_up_score_bonus);
        assert_eq!(player.high_jump_timer, tuning.high_jump_duration - 1);
    }

    #[test]
    fn test_high_jump_expires() {
        let (mut player, camera, tuning) = setup(100.0, 100.0);
        player.high_jump_active = true;
        player.high_jump_timer = 1;
        player.update(&idle(), &mut [], &camera, &tuning);
        assert!(!player.high_jump_active);
        assert_eq!(player.jump_velocity(&tuning), tuning.jump_force);
    }

    #[test]
    fn test_climbing_scores_height() {
        let (mut player, camera, tuning) = setup(100.0, 300.0);
        player.vel.y = -10.0;
        player.update(&idle(), &mut [], &camera, &tuning);
        assert!((player.rect.top() - 290.5).abs() < 1e-5);
        assert_eq!(player.highest_y, player.rect.top());
        assert_eq!(player.last_score_y, player.rect.top());
        assert_eq!(player.score, 9);
    }

    #[test]
    fn test_scoring_frame_sees_height_band_zero() {
        let (mut player, mut camera, tuning) = setup(100.0, 0.0);
        player.rect.pos.y = -1000.0;
        player.highest_y = -1000.0;
        player.last_score_y = -1000.0;
        player.last_ground_y = -1000.0;
        camera.y = -1400.0;
        player.vel.y = -10.5;

        player.update(&idle(), &mut [], &camera, &tuning);

        // highest_y has already moved to the new top, so the band is 0 and
        // 10 units climbed score exactly 10 however high the player is.
        assert_eq!(player.highest_y, player.rect.top());
        assert_eq!(player.height_level(player.rect.top(), &tuning), 0);
        assert_eq!(player.score, 10);
    }

    #[test]
    fn test_height_level_counts_bands_below_best() {
        let (player, _, tuning) = setup(100.0, 0.0);
        let interval = tuning.height_score_interval;
        assert_eq!(player.height_level(0.0, &tuning), 0);
        assert_eq!(player.height_level(-interval * 2.5, &tuning), 2);
        assert_eq!(player.height_level(interval, &tuning), 0);
    }

    #[test]
    fn test_falling_does_not_score() {
        let (mut player, camera, tuning) = setup(100.0, 300.0);
        for _ in 0..20 {
            player.update(&idle(), &mut [], &camera, &tuning);
        }
        assert_eq!(player.score, 0);
        assert_eq!(player.highest_y, 300.0);
    }

    #[test]
    fn test_long_fall_kills() {
        let (mut player, mut camera, tuning) = setup(100.0, 300.0);
        camera.y = 10_000.0;
        player.vel.y = tuning.screen_height * 3.0 + 10.0;

        assert_eq!(
            player.update(&idle(), &mut [], &camera, &tuning),
            PlayerStatus::Dead
        );
        assert!(player.is_dead);
        assert_eq!(player.death_cause, Some(DeathCause::FellTooFar));

        let frozen = player.clone();
        let status = player.update(
            &TickInput {
                jump: true,
                right: true,
                ..Default::default()
            },
            &mut [],
            &camera,
            &tuning,
        );
        assert_eq!(status, PlayerStatus::Dead);
        assert_eq!(player, frozen);
    }

    #[test]
    fn test_dropping_off_screen_kills() {
        let (mut player, camera, tuning) = setup(100.0, SCREEN_HEIGHT);
        player.update(&idle(), &mut [], &camera, &tuning);
        assert!(player.is_dead);
        assert_eq!(player.death_cause, Some(DeathCause::LeftScreen));
    }

    #[test]
    fn test_wraps_off_right_edge() {
        let tuning = Tuning::default();
        let (mut player, camera, _) = setup(tuning.screen_width + 5.0, 100.0);
        player.update(&idle(), &mut [], &camera, &tuning);
        assert_eq!(player.rect.right(), 0.0);
        assert!((player.rect.top() - 100.5).abs() < 1e-5);
    }

    #[test]
    fn test_wraps_off_left_edge() {
        let tuning = Tuning::default();
        let (mut player, camera, _) = setup(-tuning.player_width - 5.0, 100.0);
        player.update(&idle(), &mut [], &camera, &tuning);
        assert_eq!(player.rect.left(), tuning.screen_width);
    }

    #[test]
    fn test_partially_off_screen_does_not_wrap() {
        let tuning = Tuning::default();
        let (mut player, camera, _) = setup(tuning.screen_width - 10.0, 100.0);
        player.update(&idle(), &mut [], &camera, &tuning);
        assert_eq!(player.rect.left(), tuning.screen_width - 10.0);
    }
}
