// Interface adapters: headless implementations of the domain ports.

pub mod assets;
pub mod audio;
pub mod canvas;
pub mod input;

pub use assets::HeadlessAssets;
pub use audio::TracingAudio;
pub use canvas::TracingCanvas;
pub use input::AutopilotInput;
