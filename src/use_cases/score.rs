// Score keeper: points for kills and an extra life every so many points.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::{AlienSize, RockSize};
use crate::domain::events::{GameEvent, Topic};
use crate::domain::ports::WorldContext;
use crate::domain::tuning::FlowTuning;
use crate::use_cases::game::Game;
use crate::use_cases::observer::{EventObserver, Subscriptions};

#[derive(Debug, Default)]
pub struct ScoreKeeper {
    subscriptions: Subscriptions,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventObserver for ScoreKeeper {
    fn name(&self) -> &'static str {
        "score keeper"
    }

    fn register(&self, game: &Arc<Game>) {
        for topic in [Topic::RockDestroyed, Topic::AlienDestroyed] {
            self.subscriptions.add(game, topic, |game, event| async move {
                if let Some(points) = points_for(event, &game.tuning().flow) {
                    award(&game, points);
                }
            });
        }
    }

    fn deregister(&self, game: &Game) {
        self.subscriptions.release(game, self.name());
    }
}

/// Points earned for an event, if it scores at all.
pub fn points_for(event: GameEvent, flow: &FlowTuning) -> Option<u64> {
    let points = match event {
        GameEvent::RockDestroyed(size) => match size {
            RockSize::Tiny => flow.rock_points.tiny,
            RockSize::Small => flow.rock_points.small,
            RockSize::Medium => flow.rock_points.medium,
            RockSize::Big => flow.rock_points.big,
        },
        GameEvent::AlienDestroyed(size) => match size {
            AlienSize::Small => flow.alien_points.small,
            AlienSize::Big => flow.alien_points.big,
        },
        _ => return None,
    };
    Some(points)
}

/// How many extra-life thresholds lie in `(before, after]`.
pub fn extra_lives_earned(before: u64, after: u64, every: u64) -> u64 {
    if every == 0 {
        return 0;
    }
    after / every - before / every
}

fn award(game: &Game, points: u64) {
    let flow = game.tuning().flow;
    let (before, after) = game.state().add_points(points);
    for _ in 0..extra_lives_earned(before, after, flow.extra_life_every) {
        if let Some(lives) = game.state().grant_life(flow.max_lives) {
            info!(score = after, lives, "extra life");
            game.publish(GameEvent::SpaceshipExtraLife);
        }
    }
}
