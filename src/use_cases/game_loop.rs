// Fixed-cadence frame loop: input, update, draw.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::domain::cancel::CancelToken;
use crate::domain::entities::Entity;
use crate::domain::ports::Canvas;
use crate::use_cases::game::Game;
use crate::use_cases::types::{Controls, InputSource, LoopExit};

/// Drives the game one frame per `frame_interval` until quit, game over or `shutdown`.
pub async fn frame_loop(
    game: &Arc<Game>,
    input: &mut dyn InputSource,
    canvas: &dyn Canvas,
    frame_interval: Duration,
    shutdown: CancelToken,
) -> LoopExit {
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();
    let mut frames: u64 = 0;

    let exit = loop {
        tokio::select! {
            _ = shutdown.cancelled() => break LoopExit::Shutdown,
            _ = ticker.tick() => {}
        }
        let now = Instant::now();
        let delta = (now - last).as_secs_f32();
        last = now;

        let controls = input.poll(delta);
        if controls.quit {
            break LoopExit::Quit;
        }
        handle_input(game, controls, delta);

        if !game.state().is_paused() {
            game.update(delta);
        }
        game.draw(canvas);
        frames += 1;

        if game.state().is_over() {
            break LoopExit::GameOver;
        }
    };

    debug!(frames, ?exit, "frame loop stopped");
    exit
}

/// Applies one frame of controls. Ship controls are ignored while paused.
pub fn handle_input(game: &Game, controls: Controls, delta: f32) {
    if game.state().is_debug() {
        handle_debug_input(game, controls);
    }
    if controls.toggle_pause {
        let paused = game.state().toggle_pause();
        info!(paused, "pause toggled");
    }
    if game.state().is_paused() {
        return;
    }

    let fired = game.with_ship(|ship| {
        if !ship.is_alive() || ship.in_hyperspace() {
            ship.set_thrust(false, game);
            return Ok(());
        }
        if controls.rotate_left {
            ship.rotate_left(delta);
        }
        if controls.rotate_right {
            ship.rotate_right(delta);
        }
        ship.set_thrust(controls.thrust, game);
        if controls.hyperspace {
            ship.enter_hyperspace(game);
        }
        if controls.fire {
            return ship.fire(game);
        }
        Ok(())
    });
    if let Some(Err(e)) = fired {
        error!(error = %e, "spaceship failed to fire");
    }
}

fn handle_debug_input(game: &Game, controls: Controls) {
    if controls.debug_extra_life {
        let lives = game.state().grant_life(i32::MAX);
        info!(?lives, "debug: extra life");
    }
    if controls.debug_clear_rocks {
        info!("debug: destroying every rock");
        game.objects().for_each(|entity| {
            if !matches!(entity, Entity::Rock(_)) {
                return;
            }
            if let Err(e) = entity.on_destruction(Vec2::ZERO, game) {
                error!(error = %e, "debug rock destruction failed");
            }
        });
    }
}
