//! # sparkfield
//!
//! A slowly turning cloud of glowing points that leans toward the pointer, plus a
//! celebratory burst of colored sparks on demand.
//!
//! ## Quick Start
//!
//! ```ignore
//! fn main() -> Result<(), sparkfield::RunError> {
//!     sparkfield::run(sparkfield::SceneConfig::default())
//! }
//! ```
//!
//! Press Space, Enter or click to trigger a burst.
//!
//! ## Embedding
//!
//! The effect logic does not depend on the window. A host that owns its own frame
//! loop drives a [`Scene`] directly:
//!
//! ```ignore
//! use sparkfield::prelude::*;
//!
//! let mut scene = Scene::new(SceneConfig::default());
//! let mut time = Time::new();
//!
//! // Once per display refresh:
//! time.update();
//! scene.tick(time.elapsed());
//!
//! // From a button:
//! scene.trigger();
//!
//! // On teardown:
//! scene.dispose();
//! ```
//!
//! ## Components
//!
//! | Component | Type | Per frame |
//! |-----------|------|-----------|
//! | Ambient field | [`AmbientField`] | rigid rotation, traveling wave, vertical respawn |
//! | Burst | [`Burst`] | gravity, drag, integration, fade-out |
//! | Input bridge | [`PointerInput`] | latest pointer offset in `[-0.5, 0.5]^2` |
//! | Frame driver | [`Scene::tick`] | advances both effects |

pub mod burst;
pub mod config;
mod error;
pub mod field;
pub mod gpu;
pub mod input;
mod scene;
pub mod spawn;
pub mod time;
pub mod visuals;
mod window;

pub use burst::{fade_opacity, Burst, BurstState};
pub use config::{BurstConfig, FieldConfig, SceneConfig, ViewConfig};
pub use error::{GpuError, RunError};
pub use field::AmbientField;
pub use glam::{Vec2, Vec3};
pub use gpu::{Camera, GpuState};
pub use input::{InputAction, PointerInput};
pub use scene::Scene;
pub use time::Time;
pub use visuals::PointStyle;
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use sparkfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::burst::BurstState;
    pub use crate::config::{BurstConfig, FieldConfig, SceneConfig, ViewConfig};
    pub use crate::input::PointerInput;
    pub use crate::scene::Scene;
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3};
}
