// Audio manager: maps game events to sounds and loops on the audio sink.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::entities::{AlienSize, RockSize};
use crate::domain::events::{GameEvent, Topic};
use crate::domain::ports::AudioSink;
use crate::use_cases::game::Game;
use crate::use_cases::observer::{EventObserver, Subscriptions};

const FUEL_BURN: &str = "fuel_burn.wav";

const AUDIO_TOPICS: [Topic; 9] = [
    Topic::RockDestroyed,
    Topic::AlienSpawned,
    Topic::AlienDestroyed,
    Topic::AlienLeftPlayfield,
    Topic::AlienFire,
    Topic::SpaceshipFire,
    Topic::SpaceshipThrust,
    Topic::SpaceshipDestroyed,
    Topic::SpaceshipEnterHyperspace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Play(&'static str),
    StartLoop(&'static str),
    StopLoop(&'static str),
}

/// Sound cues for one event, in the order they should be issued.
pub fn cues(event: GameEvent) -> Vec<Cue> {
    match event {
        GameEvent::RockDestroyed(size) => vec![Cue::Play(match size {
            RockSize::Tiny => "explosion_tiny.wav",
            RockSize::Small => "explosion_small.wav",
            RockSize::Medium => "explosion_medium.wav",
            RockSize::Big => "explosion_large.wav",
        })],
        GameEvent::AlienSpawned(size) => vec![
            Cue::StartLoop(siren(size)),
            Cue::Play("explosion_alien.wav"),
        ],
        GameEvent::AlienDestroyed(size) => vec![
            Cue::StopLoop(siren(size)),
            Cue::Play("explosion_alien.wav"),
        ],
        GameEvent::AlienLeftPlayfield(size) => vec![Cue::StopLoop(siren(size))],
        GameEvent::AlienFire => vec![Cue::Play("fire_alien.wav")],
        GameEvent::SpaceshipFire => vec![Cue::Play("fire.wav")],
        GameEvent::SpaceshipThrust(true) => vec![Cue::StartLoop(FUEL_BURN)],
        GameEvent::SpaceshipThrust(false) => vec![Cue::StopLoop(FUEL_BURN)],
        GameEvent::SpaceshipDestroyed => {
            vec![Cue::StopLoop(FUEL_BURN), Cue::Play("explosion_ship.wav")]
        }
        GameEvent::SpaceshipEnterHyperspace => {
            vec![Cue::StopLoop(FUEL_BURN), Cue::Play("hyperspace.wav")]
        }
        GameEvent::RockSpawned(_)
        | GameEvent::SpaceshipExtraLife
        | GameEvent::LevelStarted(_)
        | GameEvent::GameOver => Vec::new(),
    }
}

fn siren(size: AlienSize) -> &'static str {
    match size {
        AlienSize::Big => "move_alien_big.wav",
        AlienSize::Small => "move_alien_small.wav",
    }
}

/// Tracks running loops so each starts and stops at most once.
pub struct Mixer {
    sink: Arc<dyn AudioSink>,
    playing: Mutex<HashSet<&'static str>>,
}

impl Mixer {
    pub fn new(sink: Arc<dyn AudioSink>) -> Self {
        Self {
            sink,
            playing: Mutex::new(HashSet::new()),
        }
    }

    /// Issues one cue. Missing sounds are logged and skipped.
    pub fn apply(&self, cue: Cue) {
        let result = match cue {
            Cue::Play(name) => self.sink.play(name),
            Cue::StartLoop(name) => {
                if !self.playing().insert(name) {
                    return;
                }
                self.sink.start_loop(name)
            }
            Cue::StopLoop(name) => {
                if !self.playing().remove(name) {
                    return;
                }
                self.sink.stop_loop(name)
            }
        };
        if let Err(e) = result {
            debug!(?cue, error = %e, "sound unavailable");
        }
    }

    pub fn playing_loops(&self) -> Vec<&'static str> {
        let mut loops: Vec<_> = self.playing().iter().copied().collect();
        loops.sort_unstable();
        loops
    }

    pub fn stop_all(&self) {
        let loops = std::mem::take(&mut *self.playing());
        for name in loops {
            if let Err(e) = self.sink.stop_loop(name) {
                debug!(name, error = %e, "sound unavailable");
            }
        }
    }

    fn playing(&self) -> MutexGuard<'_, HashSet<&'static str>> {
        self.playing.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct AudioManager {
    mixer: Arc<Mixer>,
    subscriptions: Subscriptions,
}

impl AudioManager {
    pub fn new(sink: Arc<dyn AudioSink>) -> Self {
        Self {
            mixer: Arc::new(Mixer::new(sink)),
            subscriptions: Subscriptions::new(),
        }
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }
}

impl EventObserver for AudioManager {
    fn name(&self) -> &'static str {
        "audio manager"
    }

    fn register(&self, game: &Arc<Game>) {
        for topic in AUDIO_TOPICS {
            let mixer = self.mixer.clone();
            self.subscriptions.add(game, topic, move |_, event| {
                let mixer = mixer.clone();
                async move {
                    for cue in cues(event) {
                        mixer.apply(cue);
                    }
                }
            });
        }
    }

    fn deregister(&self, game: &Game) {
        self.subscriptions.release(game, self.name());
        self.mixer.stop_all();
    }
}
