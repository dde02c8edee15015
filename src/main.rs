//! Color Rush headless demo
//!
//! Plays rounds with the auto-player and prints one JSON snapshot per state
//! change to stdout. Runs on the virtual clock unless `--realtime` is given.
//!
//! Usage: color-rush [--rounds N] [--seed S] [--mistake-rate P] [--language L] [--realtime]

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, Stdout};
    use std::time::Duration;

    use clap::Parser;
    use color_rush::consts::*;
    use color_rush::platform::JsonLinesAdapter;
    use color_rush::sim::{AutoPlayer, Bounds, Language, Scheduler, VirtualClock, WallClock};
    use color_rush::{Game, Settings};

    /// Time the bot takes to react between taps (ms)
    const REACTION_MS: u64 = 450;
    /// Give up on a round after this much game time (ms)
    const ROUND_TIME_LIMIT_MS: u64 = 10 * 60 * 1000;

    #[derive(Debug, Parser)]
    #[command(name = "color-rush")]
    #[command(about = "Headless Color Rush demo driven by the auto-player")]
    struct Options {
        /// Number of rounds to play
        #[arg(short, long, default_value = "1")]
        rounds: u32,

        /// Game seed (random if neither this nor the settings file sets one)
        #[arg(long)]
        seed: Option<u64>,

        /// Chance the bot taps a wrong color when one is on screen
        #[arg(long, default_value = "0.05")]
        mistake_rate: f32,

        /// Label language, overriding the settings file (english, russian)
        #[arg(long, value_parser = parse_language)]
        language: Option<Language>,

        /// Run on the wall clock instead of virtual time
        #[arg(long)]
        realtime: bool,
    }

    fn parse_language(s: &str) -> Result<Language, String> {
        Language::from_str(s).ok_or_else(|| format!("unknown language: {}", s))
    }

    type DemoGame<S> = Game<S, JsonLinesAdapter<Stdout>>;

    /// Play rounds until each ends or hits the time limit.
    ///
    /// `wait` lets `ms` of game time pass and runs whatever fell due.
    fn play<S: Scheduler>(
        game: &mut DemoGame<S>,
        bot: &mut AutoPlayer,
        rounds: u32,
        mut wait: impl FnMut(&mut DemoGame<S>, u64),
    ) {
        for round in 0..rounds {
            if round == 0 {
                game.start();
            } else {
                game.restart();
            }

            let mut elapsed = 0;
            while game.round().in_progress() && elapsed < ROUND_TIME_LIMIT_MS {
                wait(game, REACTION_MS);
                elapsed += REACTION_MS;
                if let Some(tap) = bot.choose_tap(&game.snapshot()) {
                    game.on_tap(tap.x, tap.y);
                }
            }

            if game.round().in_progress() {
                log::warn!("Round {} hit the time limit", round + 1);
            }
            log::info!("Round {} finished with score {}", round + 1, game.round().score);
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Color Rush (native) starting...");

        let opts = Options::parse();

        let mut settings = match Settings::load() {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Invalid settings: {}", e);
                std::process::exit(1);
            }
        };

        let seed = opts.seed.or(settings.seed).unwrap_or_else(rand::random);
        log::info!("Game initialized with seed: {}", seed);
        if let Some(language) = opts.language {
            settings.language = language;
        }
        log::info!("Labels: {}", settings.language.as_str());

        let bounds = Bounds::new(DEMO_WIDTH, DEMO_HEIGHT);
        let adapter = JsonLinesAdapter::new(bounds, io::stdout());
        let mut bot = AutoPlayer::new(seed.wrapping_add(1), opts.mistake_rate);

        let result = if opts.realtime {
            Game::new(&settings, seed, WallClock::new(), adapter).map(|mut game| {
                play(&mut game, &mut bot, opts.rounds, |game, ms| {
                    std::thread::sleep(Duration::from_millis(ms));
                    game.pump();
                });
                game.into_adapter().written()
            })
        } else {
            Game::new(&settings, seed, VirtualClock::new(), adapter).map(|mut game| {
                play(&mut game, &mut bot, opts.rounds, |game, ms| {
                    game.advance(ms);
                });
                game.into_adapter().written()
            })
        };

        match result {
            Ok(frames) => log::info!("Wrote {} snapshots", frames),
            Err(e) => {
                log::error!("Cannot start game: {}", e);
                std::process::exit(1);
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web front end drives `color_rush::Game` directly
}
