// Level flow and the alien behaviours that live for the length of a level.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, error, info};

use crate::domain::cancel::CancelToken;
use crate::domain::entities::{
    Alien, AlienSize, Entity, EntityKind, Rock, RockSize, SharedEntity, lock,
};
use crate::domain::events::GameEvent;
use crate::domain::ports::WorldContext;
use crate::domain::random;
use crate::domain::tuning::AlienTuning;
use crate::use_cases::game::Game;

/// Period between alien spawn attempts at `level`.
pub fn spawn_delay(tuning: &AlienTuning, level: u32) -> Duration {
    let secs = tuning.spawn_delay_secs - tuning.spawn_delay_step_secs * level as f32;
    Duration::from_millis((secs.max(tuning.min_spawn_delay_secs) * 1000.0).round().max(1.0) as u64)
}

/// Period between actions of one alien. Small aliens act twice as often.
pub fn action_delay(tuning: &AlienTuning, level: u32, size: AlienSize) -> Duration {
    let mut ms = tuning.action_delay_ms - tuning.action_delay_step_ms * level as f32;
    if size == AlienSize::Small {
        ms /= 2.0;
    }
    Duration::from_millis(ms.max(tuning.min_action_delay_ms).round().max(1.0) as u64)
}

/// Moves to the next level: banner, warm-up, a fresh alien spawner, then the rocks.
///
/// Expects the caller to hold the level transition, see `Game::advance_level`.
pub async fn start_level(game: Arc<Game>) {
    let flow = game.tuning().flow;
    let level = game.state().next_level();
    info!(level, "level starting");

    let banner = format!("Level {level}");
    game.state().set_banner(Some(banner.clone()));
    game.spawn_task({
        let game = game.clone();
        async move {
            if game.sleep(Duration::from_millis(flow.banner_ms)).await {
                game.state().clear_banner(&banner);
            }
        }
    });

    if !game.sleep(Duration::from_millis(flow.level_warmup_ms)).await {
        game.state().finish_level_transition();
        return;
    }

    let scope = game.shutdown_token().child();
    let spawner = game.spawn_task(alien_spawner(game.clone(), scope.clone()));
    game.replace_level_scope(scope, spawner);

    let playfield = game.playfield();
    for _ in 0..level + flow.extra_rocks {
        match Rock::new(RockSize::Big, playfield.random_border_position(), &*game) {
            Ok(rock) => {
                game.objects().add(Entity::Rock(rock));
            }
            Err(e) => error!(level, error = %e, "failed to spawn rock"),
        }
    }

    game.publish(GameEvent::LevelStarted(level));
    game.state().finish_level_transition();
    debug!(level, rocks = level + flow.extra_rocks, "level populated");
}

/// One alien at a time, on a timer that shortens as levels go up.
///
/// Runs until `scope` is cancelled, then cancels and awaits the runner of the
/// alien it last spawned.
pub async fn alien_spawner(game: Arc<Game>, scope: CancelToken) {
    let tuning = game.tuning().alien;
    let level = game.state().level();
    let delay = spawn_delay(&tuning, level);
    let mut ticker = interval_at(Instant::now() + delay, delay);
    let mut current: Option<(SharedEntity, CancelToken, JoinHandle<()>)> = None;
    debug!(level, delay_ms = delay.as_millis() as u64, "alien spawner started");

    loop {
        tokio::select! {
            _ = scope.cancelled() => break,
            _ = ticker.tick() => {}
        }
        if game.state().is_paused() {
            continue;
        }

        if let Some((alien, _, _)) = &current {
            let alive = lock(alien).is_alive();
            if alive {
                continue;
            }
            // The previous alien is gone; retire its runner and wait for the next tick.
            if let Some((_, token, runner)) = current.take() {
                token.cancel();
                let _ = runner.await;
            }
            continue;
        }

        // Another alien may still be around, e.g. one left over from before this spawner.
        let alien_present = game
            .objects()
            .any_matching(|e| e.kind() == EntityKind::Alien && e.is_alive());
        if alien_present {
            continue;
        }

        let size = AlienSize::for_level(level);
        let mut alien = match Alien::new(size, game.playfield().random_border_position(), &*game) {
            Ok(alien) => alien,
            Err(e) => {
                error!(level, error = %e, "failed to build alien");
                continue;
            }
        };
        if game
            .objects()
            .is_rectangle_occupied(alien.hitbox().extend(tuning.spawn_clearance))
        {
            debug!(level, "alien spawn point occupied");
            continue;
        }

        if scope.is_cancelled() {
            break;
        }
        let token = scope.child();
        alien.attach_runner(token.clone());
        let shared = game.objects().add(Entity::Alien(alien));
        let runner = game.spawn_task(alien_runner(game.clone(), shared.clone(), token.clone(), size));
        game.publish(GameEvent::AlienSpawned(size));
        info!(level, ?size, "alien spawned");
        current = Some((shared, token, runner));
    }

    if let Some((_, token, runner)) = current.take() {
        token.cancel();
        let _ = runner.await;
    }
    debug!(level, "alien spawner stopped");
}

/// Steers one alien: now and then pick a new heading, otherwise maybe shoot at the ship.
///
/// Exits when cancelled or on the first tick after its alien died.
pub async fn alien_runner(game: Arc<Game>, alien: SharedEntity, token: CancelToken, size: AlienSize) {
    let level = game.state().level();
    let delay = action_delay(&game.tuning().alien, level, size);
    let mut ticker = interval_at(Instant::now() + delay, delay);
    debug!(level, ?size, delay_ms = delay.as_millis() as u64, "alien runner started");

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        if game.state().is_paused() {
            continue;
        }
        let alive = lock(&alien).is_alive();
        if !alive {
            break;
        }
        // Read the ship before touching the alien so only one entity lock is held.
        let Some(target) = game.ship_position() else {
            continue;
        };
        act(&game, &alien, target);
    }
    debug!(level, ?size, "alien runner stopped");
}

fn act(game: &Game, alien: &SharedEntity, target: Vec2) {
    let tuning = game.tuning().alien;
    let mut entity = lock(alien);
    let Entity::Alien(alien) = &mut *entity else {
        return;
    };
    // It may have died since the liveness check.
    if !alien.is_alive() {
        return;
    }

    if random::chance(tuning.retarget_chance) {
        alien.randomize_target(game.playfield(), &tuning);
    } else if random::chance(tuning.fire_chance) {
        if let Err(e) = alien.fire_at(target, game) {
            error!(error = %e, "alien failed to fire");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Playfield;
    use crate::domain::tuning::Tuning;
    use crate::interface_adapters::assets::HeadlessAssets;
    use crate::use_cases::game::GameSettings;

    /// A game whose aliens act every second and always shoot when they act.
    fn trigger_happy_game() -> Arc<Game> {
        let mut tuning = Tuning::default();
        tuning.alien.retarget_chance = 0.0;
        tuning.alien.fire_chance = 1.0;
        tuning.alien.action_delay_ms = 1000.0;
        tuning.alien.action_delay_step_ms = 0.0;
        tuning.alien.spawn_delay_secs = 1.0;
        tuning.alien.spawn_delay_step_secs = 0.0;
        Game::new(
            GameSettings {
                playfield: Playfield::new(800.0, 600.0),
                tuning,
                debug: false,
            },
            Arc::new(HeadlessAssets::new()),
        )
        .expect("game")
    }

    /// Adds a big alien left of centre, settles the pending set and starts its runner.
    fn launch_alien(game: &Arc<Game>) -> (SharedEntity, CancelToken, JoinHandle<()>) {
        let alien = Alien::new(AlienSize::Big, Vec2::new(100.0, 300.0), &**game).expect("alien");
        let alien = game.objects().add(Entity::Alien(alien));
        game.update(0.0);
        let token = game.shutdown_token().child();
        let runner = tokio::spawn(alien_runner(game.clone(), alien.clone(), token.clone(), AlienSize::Big));
        (alien, token, runner)
    }

    fn place_ship(game: &Arc<Game>) {
        game.try_spawn_ship().expect("spawn").expect("clear centre");
    }

    #[test]
    fn when_level_rises_then_spawn_delay_shrinks_to_the_floor() {
        let tuning = AlienTuning::default();

        assert_eq!(spawn_delay(&tuning, 0), Duration::from_secs(10));
        assert_eq!(spawn_delay(&tuning, 4), Duration::from_secs(5));
        assert_eq!(spawn_delay(&tuning, 8), Duration::from_secs(1));
        assert_eq!(spawn_delay(&tuning, 50), Duration::from_secs(1));
    }

    #[test]
    fn when_alien_is_small_then_it_acts_twice_as_often_but_not_below_the_floor() {
        let tuning = AlienTuning::default();

        assert_eq!(action_delay(&tuning, 1, AlienSize::Big), Duration::from_millis(2700));
        assert_eq!(action_delay(&tuning, 1, AlienSize::Small), Duration::from_millis(1350));
        assert_eq!(action_delay(&tuning, 6, AlienSize::Small), Duration::from_millis(600));
        assert_eq!(action_delay(&tuning, 9, AlienSize::Big), Duration::from_millis(500));
        assert_eq!(action_delay(&tuning, 20, AlienSize::Small), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn when_alien_acts_then_it_fires_at_the_ship() {
        let game = trigger_happy_game();
        place_ship(&game);
        let (_alien, token, runner) = launch_alien(&game);
        assert_eq!(game.objects().pending_len(), 0);

        tokio::time::sleep(Duration::from_millis(1050)).await;

        assert_eq!(game.objects().pending_len(), 1);
        game.update(0.0);
        let bullet_heads_right = game.objects().any_matching(|e| match e {
            Entity::Bullet(bullet) => !bullet.is_player_fired() && bullet.body.velocity.x > 0.0,
            _ => false,
        });
        assert!(bullet_heads_right);

        token.cancel();
        runner.await.expect("runner");
    }

    #[tokio::test(start_paused = true)]
    async fn when_game_is_paused_then_alien_holds_fire_until_resumed() {
        let game = trigger_happy_game();
        place_ship(&game);
        game.state().toggle_pause();
        let (_alien, token, runner) = launch_alien(&game);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(game.objects().pending_len(), 0);
        assert!(!runner.is_finished());

        game.state().toggle_pause();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(game.objects().pending_len(), 1);

        token.cancel();
        runner.await.expect("runner");
    }

    #[tokio::test(start_paused = true)]
    async fn when_there_is_no_ship_then_alien_waits_without_firing() {
        let game = trigger_happy_game();
        let (_alien, token, runner) = launch_alien(&game);

        tokio::time::sleep(Duration::from_millis(2050)).await;

        assert_eq!(game.objects().pending_len(), 0);
        assert!(!runner.is_finished());
        token.cancel();
        runner.await.expect("runner");
    }

    #[tokio::test(start_paused = true)]
    async fn when_alien_dies_then_its_runner_stops_on_the_next_tick() {
        let game = trigger_happy_game();
        place_ship(&game);
        let (alien, _token, runner) = launch_alien(&game);

        lock(&alien).on_destruction(Vec2::ZERO, &*game).expect("destruction");
        let wreckage = game.objects().pending_len();
        tokio::time::sleep(Duration::from_millis(1050)).await;

        assert!(runner.is_finished());
        assert_eq!(game.objects().pending_len(), wreckage);
    }

    #[tokio::test(start_paused = true)]
    async fn when_game_is_paused_then_spawner_waits_and_resumes_after() {
        let game = trigger_happy_game();
        game.state().toggle_pause();
        let scope = game.shutdown_token().child();
        let spawner = tokio::spawn(alien_spawner(game.clone(), scope.clone()));

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(game.objects().pending_len(), 0);

        game.state().toggle_pause();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(game.objects().pending_len(), 1);

        scope.cancel();
        spawner.await.expect("spawner");
    }
}
