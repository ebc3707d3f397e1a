pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::greeting::{Greeting, GreetingConfig};
pub use api::types::{PageOp, SectionId, SectionState, Task, TileId, TileTransform};
pub use assets::manifest::{ManifestError, PageManifest};
pub use crate::core::rng::Rng;
pub use crate::core::time::{Timeline, TimerId};
pub use input::gesture::Gesture;
pub use renderer::surface::{Hsl, Surface};
pub use systems::celebration::Celebration;
pub use systems::confetti::{ConfettiEmitter, LoopState};
pub use systems::navigator::Navigator;
pub use systems::particle::Particle;
pub use systems::pile::{PileConfig, PileSequencer, PileTile};
