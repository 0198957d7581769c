// Framework bootstrap for a headless game session.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::domain::errors::GameError;
use crate::domain::ports::WorldContext;
use crate::frameworks::config::{self, ConfigError};
use crate::interface_adapters::{AutopilotInput, HeadlessAssets, TracingAudio, TracingCanvas};
use crate::use_cases::{
    AudioManager, Game, GameSettings, GameWarden, LoopExit, ScoreKeeper, frame_loop,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Timing of one headless run.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub frame_interval: Duration,
    /// Wall-clock length of the run before it is shut down.
    pub duration: Duration,
}

/// Final state reported once the session has torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub exit: LoopExit,
    pub score: u64,
    pub level: u32,
    pub lives: i32,
    pub draws: u64,
}

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Plays one session with the autopilot until it ends or `options.duration` elapses.
pub async fn run(settings: GameSettings, options: SessionOptions) -> Result<SessionSummary, GameError> {
    let game = Game::new(settings, Arc::new(HeadlessAssets::new()))?;

    game.register_observer(Arc::new(AudioManager::new(Arc::new(TracingAudio::new()))));
    game.register_observer(Arc::new(ScoreKeeper::new()));
    game.register_observer(Arc::new(GameWarden::new()));

    game.try_spawn_ship()?;
    game.advance_level();

    let stop = game.shutdown_token().child();
    let timer = tokio::spawn({
        let stop = stop.clone();
        let duration = options.duration;
        async move {
            tokio::time::sleep(duration).await;
            stop.cancel();
        }
    });

    let canvas = TracingCanvas::new();
    let mut input = AutopilotInput::new();
    tracing::info!(
        width = game.playfield().width,
        height = game.playfield().height,
        frame_ms = options.frame_interval.as_millis(),
        duration_secs = options.duration.as_secs(),
        "session started"
    );
    let exit = frame_loop(&game, &mut input, &canvas, options.frame_interval, stop).await;
    timer.abort();

    if let Some(level) = game.shutdown() {
        let _ = level.await;
    }

    let summary = SessionSummary {
        exit,
        score: game.state().score(),
        level: game.state().level(),
        lives: game.state().lives(),
        draws: canvas.total_draws(),
    };
    tracing::info!(
        ?exit,
        score = summary.score,
        level = summary.level,
        lives = summary.lives,
        draws = summary.draws,
        "session finished"
    );
    Ok(summary)
}

pub async fn run_with_config() -> Result<SessionSummary, SessionError> {
    init_runtime();

    let settings = config::game_settings().inspect_err(|e| {
        tracing::error!(error = %e, "failed to load settings");
    })?;
    let options = SessionOptions {
        frame_interval: config::frame_interval(),
        duration: config::run_duration(),
    };

    Ok(run(settings, options).await?)
}
