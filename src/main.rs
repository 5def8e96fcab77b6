//! Zach's Spider Adventure entry point
//!
//! Native builds run a headless session with the autopilot at the controls
//! and print the final snapshot. The browser build is driven from
//! JavaScript through `zach_platformer::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use zach_platformer::audio::{AudioDispatcher, LogSink};
    use zach_platformer::consts::SIM_HZ;
    use zach_platformer::persistence::default_store;
    use zach_platformer::sim::TickInput;
    use zach_platformer::{Session, Settings, Tuning};

    /// Environment variable naming a tuning JSON file
    const TUNING_ENV: &str = "ZACH_TUNING";
    /// Default cap: ten minutes of play
    const DEFAULT_MAX_TICKS: u64 = 10 * 60 * SIM_HZ as u64;

    struct Options {
        fast: bool,
        seed: Option<u64>,
        max_ticks: u64,
    }

    fn parse_args() -> Options {
        let mut opts = Options {
            fast: false,
            seed: None,
            max_ticks: DEFAULT_MAX_TICKS,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fast" => opts.fast = true,
                "--seed" => match args.next().map(|v| v.parse()) {
                    Some(Ok(seed)) => opts.seed = Some(seed),
                    _ => log::warn!("--seed expects an integer"),
                },
                "--max-ticks" => match args.next().map(|v| v.parse()) {
                    Some(Ok(n)) => opts.max_ticks = n,
                    _ => log::warn!("--max-ticks expects an integer"),
                },
                other => log::warn!("Ignoring unknown argument {}", other),
            }
        }
        opts
    }

    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var(TUNING_ENV) else {
            return Tuning::default();
        };
        match Tuning::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Bad tuning in {}: {} - using defaults", path, e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Zach's Spider Adventure (headless) starting...");

        let opts = parse_args();
        let seed = opts.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_millis() as u64)
        });

        let settings = Settings::load();
        let audio = AudioDispatcher::with_settings(Box::new(LogSink), &settings);
        let mut session = Session::new(load_tuning(), seed, default_store(), audio);

        let mut input = TickInput {
            idle_mode: true,
            ..TickInput::default()
        };

        let mut ticks = 0u64;
        if opts.fast {
            while ticks < opts.max_ticks && !session.state().is_game_over() {
                session.step(&input);
                ticks += 1;
            }
        } else {
            let frame = Duration::from_secs_f32(1.0 / SIM_HZ as f32);
            let mut last = Instant::now();
            while ticks < opts.max_ticks && !session.state().is_game_over() {
                std::thread::sleep(frame);
                let now = Instant::now();
                let dt = now.duration_since(last).as_secs_f32();
                last = now;
                ticks += u64::from(session.advance(dt, &mut input));
            }
        }

        let state = session.state();
        log::info!(
            "Finished after {} ticks: level {}, score {}, high score {}",
            ticks,
            state.level,
            state.score,
            session.high_score()
        );

        match serde_json::to_string_pretty(&session.snapshot_for(&settings)) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not encode snapshot: {}", e),
        }
    }
}
