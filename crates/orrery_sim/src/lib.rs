pub mod clock;
pub mod context;
pub mod events;
pub mod pipeline;
pub mod renderer;
pub mod scene;
pub mod speed;
pub mod starfield;
pub mod updater;

pub use clock::SimulationClock;
pub use context::SimulationContext;
pub use events::{ControlEvent, ControlQueue};
pub use pipeline::{OrrerySet, SimulationConfig, SimulationPlugin};
pub use renderer::{RecordingRenderer, SceneRenderer, TransformSink};
pub use scene::{BodyTransform, NodeIndex, NodeKind, SceneGraph};
pub use speed::SpeedState;
pub use starfield::Starfield;
