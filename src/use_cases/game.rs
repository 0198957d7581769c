// The game context: one per session, shared by the frame loop, observers and background tasks.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use glam::Vec2;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::cancel::CancelToken;
use crate::domain::entities::{Entity, SharedEntity, Spaceship, lock};
use crate::domain::errors::{AssetError, GameError};
use crate::domain::events::GameEvent;
use crate::domain::geometry::Playfield;
use crate::domain::ports::{AssetSource, Canvas, WorldContext};
use crate::domain::sprite::SpriteSheet;
use crate::domain::tuning::Tuning;
use crate::use_cases::collection::{EntityCollection, FrameReport};
use crate::use_cases::event_bus::EventBus;
use crate::use_cases::level;
use crate::use_cases::observer::EventObserver;
use crate::use_cases::sprites::SpriteCache;
use crate::use_cases::state::GameState;

/// Session-wide settings fixed at construction.
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub playfield: Playfield,
    pub tuning: Tuning,
    /// Enables the debug controls.
    pub debug: bool,
}

/// Background tasks owned by the current level.
struct LevelScope {
    token: CancelToken,
    spawner: JoinHandle<()>,
}

pub struct Game {
    playfield: Playfield,
    tuning: Tuning,
    state: GameState,
    objects: EntityCollection,
    bus: EventBus,
    sprites: SpriteCache,
    runtime: Handle,
    ship: Mutex<Option<SharedEntity>>,
    level_scope: Mutex<Option<LevelScope>>,
    shutdown: CancelToken,
    observers: Mutex<Vec<Arc<dyn EventObserver>>>,
}

impl Game {
    /// Creates a session bound to the current tokio runtime. Invalid tuning is rejected here.
    pub fn new(settings: GameSettings, assets: Arc<dyn AssetSource>) -> Result<Arc<Self>, GameError> {
        let runtime = Handle::try_current().map_err(|_| GameError::NoRuntime)?;
        settings.tuning.validate()?;
        Ok(Arc::new(Self {
            playfield: settings.playfield,
            state: GameState::new(settings.tuning.flow.starting_lives, settings.debug),
            tuning: settings.tuning,
            objects: EntityCollection::new(),
            bus: EventBus::new(runtime.clone()),
            sprites: SpriteCache::new(assets),
            runtime,
            ship: Mutex::new(None),
            level_scope: Mutex::new(None),
            shutdown: CancelToken::new(),
            observers: Mutex::new(Vec::new()),
        }))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn objects(&self) -> &EntityCollection {
        &self.objects
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn shutdown_token(&self) -> &CancelToken {
        &self.shutdown
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Sleeps for `duration`; false when the session shut down first.
    pub async fn sleep(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.shutdown.cancelled() => false,
        }
    }

    pub fn spawn_task<F>(&self, task: F) -> JoinHandle<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(task)
    }

    pub fn register_observer(self: &Arc<Self>, observer: Arc<dyn EventObserver>) {
        observer.register(self);
        debug!(observer = observer.name(), "observer registered");
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    /// The current ship, alive or not.
    pub fn ship(&self) -> Option<SharedEntity> {
        self.ship
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs `f` against the current ship. Takes the ship lock; never call with another entity locked.
    pub fn with_ship<R>(&self, f: impl FnOnce(&mut Spaceship) -> R) -> Option<R> {
        let ship = self.ship()?;
        let mut entity = lock(&ship);
        match &mut *entity {
            Entity::Ship(ship) => Some(f(ship)),
            _ => None,
        }
    }

    /// Position of the ship while it is alive.
    pub fn ship_position(&self) -> Option<Vec2> {
        self.with_ship(|ship| ship.is_alive().then_some(ship.body.position))
            .flatten()
    }

    /// Places a new ship at the centre if its spawn zone is clear.
    pub fn try_spawn_ship(&self) -> Result<Option<SharedEntity>, GameError> {
        let ship = Spaceship::new(self)?;
        if self.objects.is_rectangle_occupied(ship.spawn_zone(self.playfield)) {
            return Ok(None);
        }
        let shared = Entity::Ship(ship).share();
        self.objects.add_shared(shared.clone());
        *self.ship.lock().unwrap_or_else(PoisonError::into_inner) = Some(shared.clone());
        Ok(Some(shared))
    }

    pub fn update(&self, delta: f32) -> FrameReport {
        self.objects.update(delta, self)
    }

    pub fn draw(&self, canvas: &dyn Canvas) {
        self.objects.draw(canvas);
    }

    /// Starts the next level unless one is already starting or the game is over.
    ///
    /// The finished level's tasks are cancelled right away, so nothing from it
    /// keeps running through the next level's warm-up.
    pub fn advance_level(self: &Arc<Self>) -> bool {
        if self.state.is_over() || self.is_shut_down() {
            return false;
        }
        if !self.state.try_begin_level_transition() {
            debug!("level transition already in flight");
            return false;
        }
        if self.end_level().is_some() {
            debug!(level = self.state.level(), "previous level scope cancelled");
        }
        self.spawn_task(level::start_level(self.clone()));
        true
    }

    /// Installs the background tasks of a new level. Any scope still installed is cancelled.
    pub(crate) fn replace_level_scope(&self, token: CancelToken, spawner: JoinHandle<()>) {
        let previous = self
            .level_scope
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(LevelScope { token, spawner });
        if let Some(previous) = previous {
            previous.token.cancel();
        }
    }

    /// Cancels the current level's background tasks; await the handle to see them finish.
    pub fn end_level(&self) -> Option<JoinHandle<()>> {
        let scope = self
            .level_scope
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;
        scope.token.cancel();
        Some(scope.spawner)
    }

    /// Ends the game once, stopping the level and telling observers.
    pub fn game_over(&self) {
        if !self.state.set_over() {
            return;
        }
        drop(self.end_level());
        info!(
            score = self.state.score(),
            level = self.state.level(),
            "game over"
        );
        self.bus.publish(GameEvent::GameOver);
    }

    /// Tears the session down: observers first, then every background task.
    pub fn shutdown(&self) -> Option<JoinHandle<()>> {
        let observers = std::mem::take(
            &mut *self.observers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for observer in observers {
            observer.deregister(self);
            debug!(observer = observer.name(), "observer deregistered");
        }
        let level = self.end_level();
        self.shutdown.cancel();
        level
    }
}

impl WorldContext for Game {
    fn playfield(&self) -> Playfield {
        self.playfield
    }

    fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn level(&self) -> u32 {
        self.state.level()
    }

    fn sprite(&self, name: &str, rows: u32, cols: u32) -> Result<Arc<SpriteSheet>, AssetError> {
        self.sprites.get(name, rows, cols)
    }

    fn spawn(&self, entity: Entity) -> SharedEntity {
        self.objects.add(entity)
    }

    fn publish(&self, event: GameEvent) {
        self.bus.publish(event);
    }

    fn lose_life(&self) -> i32 {
        self.state.lose_life()
    }
}
