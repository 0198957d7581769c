// Use cases layer: the entity registry, event flow and the behaviours that drive a session.

pub mod audio;
pub mod collection;
pub mod event_bus;
pub mod game;
pub mod game_loop;
pub mod level;
pub mod observer;
pub mod score;
pub mod sprites;
pub mod state;
pub mod types;
pub mod warden;

pub use audio::AudioManager;
pub use collection::{EntityCollection, FrameReport};
pub use event_bus::{EventBus, SubscriptionId};
pub use game::{Game, GameSettings};
pub use game_loop::frame_loop;
pub use observer::EventObserver;
pub use score::ScoreKeeper;
pub use state::GameState;
pub use types::{Controls, InputSource, LoopExit};
pub use warden::GameWarden;
