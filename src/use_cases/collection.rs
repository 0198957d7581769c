// Authoritative registry of entities and the per-frame update/collision pass.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use glam::Vec2;
use tracing::{error, trace};

use crate::domain::entities::{Entity, SharedEntity, lock};
use crate::domain::geometry::Rect;
use crate::domain::ports::{Canvas, WorldContext};

/// Counters describing one `update` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub removed: usize,
    pub born: usize,
    pub live: usize,
    pub collisions: usize,
}

/// Live entities plus a buffer of entities waiting to join them.
///
/// `add` only ever touches the pending buffer, so entities may be added from
/// any task, including from inside another entity's collision handler.
/// Queries work on a snapshot of the live set and lock one entity at a time;
/// never call them while holding an entity lock.
#[derive(Debug, Default)]
pub struct EntityCollection {
    live: RwLock<Vec<SharedEntity>>,
    pending: Mutex<Vec<SharedEntity>>,
}

impl EntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an entity; it joins the live set on the next `update`.
    pub fn add(&self, entity: Entity) -> SharedEntity {
        let shared = entity.share();
        self.add_shared(shared.clone());
        shared
    }

    pub fn add_shared(&self, entity: SharedEntity) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entity);
    }

    /// Advances the world by one frame.
    ///
    /// Dead entities are swap-removed, pending entities join, every live
    /// entity updates, then overlapping pairs collide. Entities that joined
    /// during this call are updated but only collide from the next one.
    pub fn update(&self, delta: f32, world: &dyn WorldContext) -> FrameReport {
        let mut report = FrameReport::default();

        let (snapshot, settled) = {
            let mut live = self.live.write().unwrap_or_else(PoisonError::into_inner);
            for i in (0..live.len()).rev() {
                if !lock(&live[i]).is_alive() {
                    live.swap_remove(i);
                    report.removed += 1;
                }
            }

            let settled = live.len();
            let born = std::mem::take(
                &mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner),
            );
            report.born = born.len();
            live.extend(born);
            report.live = live.len();
            (live.clone(), settled)
        };

        for entity in &snapshot {
            lock(entity).update(delta, world);
        }

        report.collisions = collide(&snapshot[..settled], world);
        trace!(
            removed = report.removed,
            born = report.born,
            live = report.live,
            collisions = report.collisions,
            "frame updated"
        );
        report
    }

    /// Draws every live entity in collection order. Failures are logged and skipped.
    pub fn draw(&self, canvas: &dyn Canvas) {
        for entity in self.snapshot() {
            let entity = lock(&entity);
            if let Err(e) = entity.draw(canvas) {
                error!(entity = %entity.id(), kind = ?entity.kind(), error = %e, "entity draw failed");
            }
        }
    }

    /// True while any live or pending entity is a living enemy.
    pub fn has_remaining_enemies(&self) -> bool {
        let is_threat = |e: &SharedEntity| {
            let e = lock(e);
            e.is_alive() && e.is_enemy()
        };
        if self.snapshot().iter().any(is_threat) {
            return true;
        }
        self.pending_snapshot().iter().any(is_threat)
    }

    pub fn any_matching(&self, predicate: impl Fn(&Entity) -> bool) -> bool {
        self.snapshot().iter().any(|e| predicate(&lock(e)))
    }

    pub fn for_each(&self, mut action: impl FnMut(&mut Entity)) {
        for entity in self.snapshot() {
            action(&mut lock(&entity));
        }
    }

    /// True when a living, collidable entity overlaps `rect`.
    pub fn is_rectangle_occupied(&self, rect: Rect) -> bool {
        self.any_matching(|e| e.is_alive() && e.hitbox().is_some_and(|h| h.overlaps(&rect)))
    }

    pub fn is_position_occupied(&self, point: Vec2) -> bool {
        self.any_matching(|e| e.is_alive() && e.hitbox().is_some_and(|h| h.contains(point)))
    }

    pub fn len(&self) -> usize {
        self.live.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pending_len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn snapshot(&self) -> Vec<SharedEntity> {
        self.live
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn pending_snapshot(&self) -> Vec<SharedEntity> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

// All-pairs scan, O(n^2) per frame. Both sides get their handler called on overlap.
fn collide(entities: &[SharedEntity], world: &dyn WorldContext) -> usize {
    let mut collisions = 0;
    for i in (0..entities.len()).rev() {
        for j in (0..i).rev() {
            if Arc::ptr_eq(&entities[i], &entities[j]) {
                continue;
            }
            let mut hammer = lock(&entities[i]);
            let mut anvil = lock(&entities[j]);
            if !hammer.is_alive() || !anvil.is_alive() {
                continue;
            }
            let (Some(a), Some(b)) = (hammer.hitbox(), anvil.hitbox()) else {
                continue;
            };
            if !a.overlaps(&b) {
                continue;
            }

            collisions += 1;
            if let Err(e) = hammer.on_collision(&mut anvil, world) {
                error!(hammer = %hammer.id(), anvil = %anvil.id(), error = %e, "collision failed");
            }
            if let Err(e) = anvil.on_collision(&mut hammer, world) {
                error!(hammer = %anvil.id(), anvil = %hammer.id(), error = %e, "collision failed");
            }
        }
    }
    collisions
}
