//! Neon Defender entry point
//!
//! Headless runner: the autopilot plays through the same input adapters a
//! real device would use, and a text HUD stands in for the renderer.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use neon_defender::consts::{PLAYER_DEAD_ZONE, SIM_DT};
use neon_defender::highscores::DEFAULT_HIGH_SCORE_FILE;
use neon_defender::platform::{FixedStep, Key, KeyState, PointerState};
use neon_defender::renderer::{HudRenderer, ParticleSystem, Renderer, Snapshot};
use neon_defender::sim::{GameSession, Steer, TickInput, autopilot_input};
use neon_defender::{
    Game, GamePhase, HighScoreStore, InputScheme, QualityPreset, Settings, Tuning,
};

/// Offsets the effects RNG from the gameplay seed
const FX_SEED_SALT: u64 = 0x5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "neon-defender", version, about = "Headless Neon Defender runner")]
struct Args {
    /// Base seed; run N uses a seed derived from it
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Frame limit per run (60 frames = 1 second)
    #[arg(long, default_value_t = 60 * 180)]
    frames: u64,

    /// Number of runs to play back to back
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// High score file
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    no_save: bool,

    /// Balance overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Front-end settings (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Quality preset (low, medium, high); overrides the settings file
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,

    /// Pace frames at 60 Hz wall-clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Frames between HUD lines while playing
    #[arg(long, default_value_t = 120)]
    hud_every: u64,

    /// Print the final frame as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Neon Defender (headless) starting...");

    let settings = match (args.settings.as_deref(), args.quality) {
        (Some(path), Some(preset)) => Settings {
            quality: preset,
            ..Settings::load(path)
        },
        (Some(path), None) => Settings::load(path),
        (None, Some(preset)) => Settings::from_preset(preset),
        (None, None) => Settings::default(),
    };
    log::info!(
        "Quality {} ({} particles max)",
        settings.quality.as_str(),
        settings.max_particles()
    );
    let tuning = args.tuning.as_deref().map(Tuning::load).unwrap_or_default();
    let store = if args.no_save {
        HighScoreStore::in_memory()
    } else {
        HighScoreStore::at_path(&args.high_score)
    };

    let mut game = Game::new(store, tuning, args.seed);
    let mut particles = ParticleSystem::new(args.seed ^ FX_SEED_SALT, settings.max_particles());
    let hud_every = if settings.show_hud { args.hud_every } else { 0 };
    let mut hud = HudRenderer::new(io::stdout(), hud_every);
    let mut pointer = PointerState::default();
    let mut keys = KeyState::default();

    hud.render(&Snapshot::capture(&game), particles.particles());

    for run in 0..args.runs {
        if !game.begin_run() {
            log::error!("Could not start run {} from {:?}", run + 1, game.phase());
            break;
        }
        particles.clear();

        play_run(
            &mut game,
            &args,
            settings.input,
            &mut pointer,
            &mut keys,
            &mut particles,
            &mut hud,
        );
        // Frame limit reached with the ship still alive
        if game.phase() != GamePhase::GameOver {
            game.end_run();
        }

        if let Some(session) = game.session() {
            println!(
                "run {}: seed {} score {} wave {} kills {} health {}{}",
                run + 1,
                session.seed(),
                session.score,
                session.wave,
                session.total_kills,
                session.player.health,
                if game.new_record() { " NEW RECORD" } else { "" }
            );
        }
        if game.quit_requested() {
            break;
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&Snapshot::capture(&game))?);
    }
    Ok(())
}

fn parse_quality(value: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(value).ok_or_else(|| format!("unknown quality preset '{}'", value))
}

/// Play one session until game over or the frame limit
fn play_run(
    game: &mut Game,
    args: &Args,
    scheme: InputScheme,
    pointer: &mut PointerState,
    keys: &mut KeyState,
    particles: &mut ParticleSystem,
    hud: &mut impl Renderer,
) {
    let frame_time = Duration::from_secs_f32(SIM_DT);
    let mut clock = FixedStep::default();
    let mut last = Instant::now();

    for _ in 0..args.frames {
        let steps = if args.realtime {
            let now = Instant::now();
            let elapsed = now.duration_since(last).as_secs_f32();
            last = now;
            clock.advance(elapsed)
        } else {
            1
        };

        for _ in 0..steps {
            let Some(session) = game.session() else {
                return;
            };
            let input = device_input(scheme, session, pointer, keys);
            let events = game.update(&input, clock.step());
            particles.handle_events(events);
            pointer.end_tick();
            keys.end_tick();
        }
        particles.update(steps as f32 * clock.step());
        hud.render(&Snapshot::capture(game), particles.particles());

        if game.phase() == GamePhase::GameOver {
            return;
        }
        if args.realtime {
            thread::sleep(frame_time.saturating_sub(last.elapsed()));
        }
    }
}

/// Feed the autopilot's plan through the adapter for the chosen device
fn device_input(
    scheme: InputScheme,
    session: &GameSession,
    pointer: &mut PointerState,
    keys: &mut KeyState,
) -> TickInput {
    let plan = autopilot_input(session);
    let Steer::Toward(target) = plan.steer else {
        return plan;
    };

    match scheme {
        InputScheme::Pointer => {
            if plan.fire {
                pointer.press(target);
            } else if pointer.position.is_some() {
                pointer.drag(target);
            } else {
                pointer.press(target);
                pointer.end_tick();
            }
            TickInput::from(&*pointer)
        }
        InputScheme::Keys => {
            let center_x = session.player.rect().center().x;
            let set = |keys: &mut KeyState, key: Key, down: bool| {
                if down {
                    keys.press(key);
                } else {
                    keys.release(key);
                }
            };
            set(keys, Key::Left, target.x < center_x - PLAYER_DEAD_ZONE);
            set(keys, Key::Right, target.x > center_x + PLAYER_DEAD_ZONE);
            set(keys, Key::Fire, plan.fire);
            TickInput::from(&*keys)
        }
    }
}
