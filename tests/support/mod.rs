// Shared game construction and event recording for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use space_rocks::domain::events::{GameEvent, Topic};
use space_rocks::domain::geometry::Playfield;
use space_rocks::domain::tuning::Tuning;
use space_rocks::interface_adapters::HeadlessAssets;
use space_rocks::use_cases::{Controls, Game, GameSettings, InputSource};

pub fn settings() -> GameSettings {
    GameSettings {
        playfield: Playfield::new(800.0, 600.0),
        tuning: Tuning::default(),
        debug: false,
    }
}

pub fn new_game() -> Arc<Game> {
    game_with(settings())
}

pub fn game_with(settings: GameSettings) -> Arc<Game> {
    Game::new(settings, Arc::new(HeadlessAssets::new())).expect("game inside a runtime")
}

// Gives spawned bus handlers a chance to run.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

// Records every event published on `topic`.
pub fn record(game: &Game, topic: Topic) -> Arc<Mutex<Vec<GameEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    game.bus().subscribe(topic, move |event| {
        sink.lock().expect("recorder mutex poisoned").push(event);
        async {}
    });
    seen
}

pub fn count(seen: &Arc<Mutex<Vec<GameEvent>>>) -> usize {
    seen.lock().expect("recorder mutex poisoned").len()
}

// Plays back a fixed list of frames, then asks to quit.
pub struct ScriptedInput {
    frames: VecDeque<Controls>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Controls>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _delta: f32) -> Controls {
        self.frames.pop_front().unwrap_or(Controls {
            quit: true,
            ..Controls::default()
        })
    }
}
