// Domain layer: simulation types, entity rules and the ports they reach through.

pub mod cancel;
pub mod entities;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod physics;
pub mod ports;
pub mod random;
pub mod sprite;
#[cfg(test)]
pub(crate) mod test_support;
pub mod tuning;

pub use cancel::CancelToken;
pub use entities::{AlienSize, Entity, EntityId, EntityKind, RockSize, SharedEntity};
pub use errors::{AssetError, BusError, EntityError, GameError, TuningError};
pub use events::{GameEvent, Topic};
pub use geometry::{Playfield, Rect};
pub use physics::Body;
pub use tuning::Tuning;
