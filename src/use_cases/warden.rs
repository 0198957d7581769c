// Game warden: level clears, respawns after a lost ship, and hyperspace jumps.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::domain::entities::{Debris, Entity, SharedEntity, lock};
use crate::domain::events::Topic;
use crate::domain::ports::WorldContext;
use crate::use_cases::game::Game;
use crate::use_cases::observer::{EventObserver, Subscriptions};

/// First ship sheet frame used for hyperspace fragments.
const FRAGMENT_FIRST_FRAME: u32 = 3;

#[derive(Debug, Default)]
pub struct GameWarden {
    subscriptions: Subscriptions,
}

impl GameWarden {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventObserver for GameWarden {
    fn name(&self) -> &'static str {
        "game warden"
    }

    fn register(&self, game: &Arc<Game>) {
        for topic in [
            Topic::RockDestroyed,
            Topic::AlienDestroyed,
            Topic::AlienLeftPlayfield,
        ] {
            self.subscriptions
                .add(game, topic, |game, _| async move { enemy_destroyed(game) });
        }
        self.subscriptions
            .add(game, Topic::SpaceshipDestroyed, |game, _| respawn_sequence(game));
        self.subscriptions
            .add(game, Topic::SpaceshipEnterHyperspace, |game, _| {
                hyperspace_sequence(game)
            });
    }

    fn deregister(&self, game: &Game) {
        self.subscriptions.release(game, self.name());
    }
}

/// Starts the next level once nothing hostile is left, at most once per clear.
pub fn enemy_destroyed(game: Arc<Game>) {
    if game.objects().has_remaining_enemies() {
        return;
    }
    if game.advance_level() {
        info!(level = game.state().level(), "level cleared");
    }
}

/// Waits out the explosion, then respawns the ship at a clear centre or ends the game.
pub async fn respawn_sequence(game: Arc<Game>) {
    let flow = game.tuning().flow;
    if !game.sleep(Duration::from_millis(flow.respawn_delay_ms)).await {
        return;
    }
    if game.state().lives() <= 0 {
        game.game_over();
        return;
    }

    loop {
        if game.state().is_over() {
            return;
        }
        match game.try_spawn_ship() {
            Ok(Some(_)) => {
                info!(lives = game.state().lives(), "spaceship respawned");
                return;
            }
            Ok(None) => debug!("respawn point occupied"),
            Err(e) => {
                error!(error = %e, "failed to respawn spaceship");
                return;
            }
        }
        if !game.sleep(Duration::from_millis(flow.respawn_poll_ms)).await {
            return;
        }
    }
}

/// Scatters ship fragments, moves the hidden ship, pulls the fragments back together and
/// hands control back.
pub async fn hyperspace_sequence(game: Arc<Game>) {
    let flow = game.tuning().flow;
    let phase = Duration::from_millis(flow.hyperspace_phase_ms);
    let phase_secs = phase.as_secs_f32();
    let playfield = game.playfield();

    let Some((origin, sheet)) = game
        .with_ship(|ship| ship.in_hyperspace().then(|| (ship.body.position, ship.sheet())))
        .flatten()
    else {
        return;
    };

    let fragments: Vec<SharedEntity> = (0..flow.hyperspace_fragments)
        .map(|i| {
            let frame = FRAGMENT_FIRST_FRAME + i % (sheet.frame_count() - FRAGMENT_FIRST_FRAME);
            let lifespan = (flow.hyperspace_phase_ms * 2) as u32;
            let mut piece = Debris::new(origin, sheet.clone(), frame, lifespan, &game.tuning().debris);
            piece.steer_to(playfield.random_position(), phase_secs);
            game.objects().add(Entity::Debris(piece))
        })
        .collect();
    debug!(fragments = fragments.len(), "entered hyperspace");

    if !game.sleep(phase).await {
        return;
    }

    let destination = playfield.random_position();
    game.with_ship(|ship| ship.body.position = destination);
    for fragment in &fragments {
        if let Entity::Debris(piece) = &mut *lock(fragment) {
            piece.steer_to(destination, phase_secs);
        }
    }

    if !game.sleep(phase).await {
        return;
    }
    game.with_ship(|ship| ship.exit_hyperspace(destination));
    info!(x = destination.x, y = destination.y, "left hyperspace");
}
