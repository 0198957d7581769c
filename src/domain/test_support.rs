use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use glam::Vec2;

use crate::domain::entities::{Entity, EntityKind, RockSize, SharedEntity, lock};
use crate::domain::errors::AssetError;
use crate::domain::events::GameEvent;
use crate::domain::geometry::Playfield;
use crate::domain::ports::{AssetSource, WorldContext};
use crate::domain::sprite::SpriteSheet;
use crate::domain::tuning::Tuning;
use crate::interface_adapters::assets::HeadlessAssets;

// World fake that records spawns, events and lives lost for unit tests.
pub(crate) struct RecordingWorld {
    playfield: Playfield,
    tuning: Tuning,
    level: u32,
    lives: AtomicI32,
    lives_lost: AtomicI32,
    spawned: Mutex<Vec<SharedEntity>>,
    events: Mutex<Vec<GameEvent>>,
    sprites: Mutex<HashMap<String, Arc<SpriteSheet>>>,
}

impl RecordingWorld {
    pub(crate) fn new() -> Self {
        let tuning = Tuning::default();
        Self {
            playfield: Playfield::new(800.0, 600.0),
            lives: AtomicI32::new(tuning.flow.starting_lives),
            tuning,
            level: 1,
            lives_lost: AtomicI32::new(0),
            spawned: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            sprites: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn events(&self) -> Vec<GameEvent> {
        self.events.lock().expect("events mutex poisoned").clone()
    }

    pub(crate) fn lives_lost(&self) -> i32 {
        self.lives_lost.load(Ordering::SeqCst)
    }

    pub(crate) fn spawned_count(&self) -> usize {
        self.spawned.lock().expect("spawned mutex poisoned").len()
    }

    pub(crate) fn spawned(&self) -> Vec<SharedEntity> {
        self.spawned.lock().expect("spawned mutex poisoned").clone()
    }

    pub(crate) fn spawned_rocks(&self) -> Vec<RockSize> {
        self.spawned()
            .iter()
            .filter_map(|e| match &*lock(e) {
                Entity::Rock(rock) => Some(rock.size()),
                _ => None,
            })
            .collect()
    }

    // (player fired, velocity) for every spawned bullet.
    pub(crate) fn spawned_bullets(&self) -> Vec<(bool, Vec2)> {
        self.spawned()
            .iter()
            .filter_map(|e| match &*lock(e) {
                Entity::Bullet(bullet) => Some((bullet.is_player_fired(), bullet.body.velocity)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn spawned_positions(&self, kind: EntityKind) -> Vec<Vec2> {
        self.spawned()
            .iter()
            .map(lock)
            .filter(|e| e.kind() == kind)
            .map(|e| e.position())
            .collect()
    }
}

impl WorldContext for RecordingWorld {
    fn playfield(&self) -> Playfield {
        self.playfield
    }

    fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn sprite(&self, name: &str, rows: u32, cols: u32) -> Result<Arc<SpriteSheet>, AssetError> {
        let mut sprites = self.sprites.lock().expect("sprites mutex poisoned");
        if let Some(sheet) = sprites.get(name) {
            return Ok(sheet.clone());
        }
        let sheet = Arc::new(SpriteSheet::new(
            name,
            HeadlessAssets::new().texture_size(name)?,
            rows,
            cols,
        )?);
        sprites.insert(name.to_string(), sheet.clone());
        Ok(sheet)
    }

    fn spawn(&self, entity: Entity) -> SharedEntity {
        let shared = entity.share();
        self.spawned
            .lock()
            .expect("spawned mutex poisoned")
            .push(shared.clone());
        shared
    }

    fn publish(&self, event: GameEvent) {
        self.events.lock().expect("events mutex poisoned").push(event);
    }

    fn lose_life(&self) -> i32 {
        self.lives_lost.fetch_add(1, Ordering::SeqCst);
        self.lives.fetch_sub(1, Ordering::SeqCst) - 1
    }
}
