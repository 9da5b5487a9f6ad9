pub mod camera;
pub mod config;
pub mod connections;
pub mod constants;
pub mod decorations;
pub mod error;
pub mod geometry;
pub mod icons;
pub mod input;
pub mod palette;
pub mod particles;
pub mod scene;
pub mod scheduler;
pub mod uniforms;

pub use camera::{smooth_toward, Camera, CameraRig};
pub use config::SceneConfig;
pub use connections::{ConnectionBuffer, LineVertex, Segment};
pub use decorations::DecorationStyle;
pub use error::BackdropError;
pub use geometry::MeshVertex;
pub use icons::{IconStyle, ICONS, ICON_LAYER_COUNT, ICON_TEXTURE_SIZE};
pub use input::{pointer_ndc, scroll_fraction, InputTargets, Viewport};
pub use palette::Theme;
pub use particles::{ParticleInstance, ParticleSet};
pub use scene::{Scene, TickReport};
pub use scheduler::{LoopControl, LoopState};
pub use uniforms::{LineUniforms, MeshInstance, MeshUniforms, ParticleUniforms};

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");
pub static MESHES_WGSL: &str = include_str!("../shaders/meshes.wgsl");
