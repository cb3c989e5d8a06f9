//! Sky Hopper - headless runner
//!
//! Drives a session at the fixed frame rate with a simple autopilot standing
//! in for the keyboard, and records each frame's draw list the way a window
//! host would consume it.

use std::error::Error;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use sky_hopper::Tuning;
use sky_hopper::consts::FPS;
use sky_hopper::render::{DrawCommand, draw_frame};
use sky_hopper::sim::{GamePhase, GameState, TickInput, tick};

/// Ten minutes of play
const DEFAULT_FRAMES: u64 = 10 * 60 * FPS as u64;

#[derive(Parser)]
#[command(name = "sky-hopper", about = "Headless endless-jumper session")]
struct Args {
    /// Level seed (defaults to the clock)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum number of frames to simulate
    #[arg(short, long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,

    /// JSON file overriding the default tunables
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Print the effective tunables as JSON and exit
    #[arg(long)]
    dump_tuning: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Steer under the nearest visible platform above the player
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let target = state
        .level
        .platforms
        .iter()
        .filter(|p| p.is_visible() && p.rect.top() < player.rect.top())
        .min_by(|a, b| {
            let da = player.rect.top() - a.rect.top();
            let db = player.rect.top() - b.rect.top();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.rect.center_x());

    let mut input = TickInput::default();
    if let Some(target_x) = target {
        let dx = target_x - player.rect.center_x();
        let dead_zone = state.tuning.player_speed;
        input.left = dx < -dead_zone;
        input.right = dx > dead_zone;
    }
    input
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    if args.dump_tuning {
        println!("{}", tuning.to_json_string()?);
        return Ok(());
    }

    log::info!("Sky Hopper (headless) starting...");
    let mut state = GameState::new(args.seed.unwrap_or_else(clock_seed), tuning)?;
    let mut frame: Vec<DrawCommand> = Vec::new();

    for _ in 0..args.frames {
        let input = autopilot(&state);
        let phase = tick(&mut state, &input);

        frame.clear();
        draw_frame(&state, &mut frame);

        if state.time_ticks % FPS as u64 == 0 {
            log::debug!(
                "t={}s score={} camera={:.0} platforms={} draws={}",
                state.time_ticks / FPS as u64,
                state.score(),
                state.camera.y,
                state.level.platforms.len(),
                frame.len()
            );
        }
        if phase == GamePhase::GameOver {
            break;
        }
    }

    let outcome = if state.is_game_over() { "Game Over!" } else { "Still going" };
    println!(
        "{outcome} Final Score: {} (seed {}, {} frames)",
        state.score(),
        state.seed,
        state.time_ticks
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sky-hopper"]).unwrap();
        assert_eq!(args.seed, None);
        assert_eq!(args.frames, DEFAULT_FRAMES);
        assert!(args.tuning.is_none());
        assert!(!args.dump_tuning);
    }

    #[test]
    fn test_flags_parse() {
        let args = Args::try_parse_from([
            "sky-hopper",
            "--seed",
            "42",
            "-f",
            "600",
            "--tuning",
            "tuning.json",
            "--dump-tuning",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.frames, 600);
        assert_eq!(args.tuning, Some(PathBuf::from("tuning.json")));
        assert!(args.dump_tuning);
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(Args::try_parse_from(["sky-hopper", "--seed", "abc"]).is_err());
        assert!(Args::try_parse_from(["sky-hopper", "--bogus"]).is_err());
    }
}
