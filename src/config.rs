//! Tuning constants for the effect, grouped per component.
//!
//! Every value here is a design constant chosen for visual feel. The `Default`
//! implementations are the shipped look; the `with_*` setters exist so tests and
//! embedders can pin seeds or zero out forces.
//!
//! ```ignore
//! let config = SceneConfig::default()
//!     .with_seed(7)
//!     .with_burst(BurstConfig { gravity: 0.0, ..Default::default() });
//! let scene = Scene::new(config);
//! ```

use glam::Vec3;

use crate::visuals::{hex_to_rgb, AMBIENT_ACCENT, AMBIENT_PRIMARY, BACKGROUND, BURST_PALETTE};

/// Ambient field constants.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Number of background points.
    pub count: usize,
    /// Half-size of the spawn cube; also the vertical respawn bound.
    pub extent: f32,
    /// Colors assigned to even and odd indices.
    pub colors: [Vec3; 2],
    /// Base rotation increment per frame (doubled on the vertical axis).
    pub spin_speed: f32,
    /// Rotation increment per unit of pointer offset, before `interaction_gain`.
    pub interaction: f32,
    /// Multiplier on the pointer contribution.
    pub interaction_gain: f32,
    /// Height of the traveling wave added each frame.
    pub wave_amplitude: f32,
    /// Spatial frequency of the wave along x and z.
    pub wave_frequency: f32,
    /// Converts elapsed seconds into wave phase.
    pub wave_time_scale: f32,
    /// Point size in world units.
    pub point_size: f32,
    /// Material opacity.
    pub opacity: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            extent: 5.0,
            colors: [hex_to_rgb(AMBIENT_PRIMARY), hex_to_rgb(AMBIENT_ACCENT)],
            spin_speed: 0.00005,
            interaction: 0.00005,
            interaction_gain: 20.0,
            wave_amplitude: 0.001,
            wave_frequency: 0.5,
            // Milliseconds * 0.00005, expressed per second.
            wave_time_scale: 0.05,
            point_size: 0.02,
            opacity: 0.8,
        }
    }
}

/// Burst effect constants.
#[derive(Debug, Clone, PartialEq)]
pub struct BurstConfig {
    /// Number of points per burst.
    pub count: usize,
    /// Frames a burst lives for.
    pub lifespan: u32,
    /// Number of final frames over which opacity ramps down.
    pub fade_frames: u32,
    /// Lower bound of the launch speed (inclusive).
    pub min_speed: f32,
    /// Upper bound of the launch speed (exclusive).
    pub max_speed: f32,
    /// Subtracted from vertical velocity every frame.
    pub gravity: f32,
    /// Velocity multiplier applied every frame.
    pub drag: f32,
    /// Colors a particle may be assigned at spawn.
    pub palette: Vec<Vec3>,
    /// Spawn point.
    pub origin: Vec3,
    /// Point size in world units.
    pub point_size: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 500,
            lifespan: 60,
            fade_frames: 20,
            min_speed: 0.05,
            max_speed: 0.25,
            gravity: 0.001,
            drag: 0.98,
            palette: BURST_PALETTE.iter().copied().map(hex_to_rgb).collect(),
            origin: Vec3::ZERO,
            point_size: 0.1,
        }
    }
}

/// Camera and window constants.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Camera position; the camera looks at the origin.
    pub eye: Vec3,
    /// Opaque clear color.
    pub background: Vec3,
    /// Window title prefix.
    pub title: String,
    /// Initial logical window size.
    pub width: u32,
    pub height: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            eye: Vec3::new(0.0, 0.0, 5.0),
            background: hex_to_rgb(BACKGROUND),
            title: "sparkfield".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Everything a [`Scene`](crate::Scene) needs to be created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneConfig {
    pub field: FieldConfig,
    pub burst: BurstConfig,
    pub view: ViewConfig,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl SceneConfig {
    /// Create a config holding the default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ambient field constants.
    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    /// Replace the burst constants.
    pub fn with_burst(mut self, burst: BurstConfig) -> Self {
        self.burst = burst;
        self
    }

    /// Replace the camera and window constants.
    pub fn with_view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    /// Seed the scene RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_constants() {
        let config = SceneConfig::default();
        assert_eq!(config.field.count, 2000);
        assert_eq!(config.burst.count, 500);
        assert_eq!(config.burst.lifespan, 60);
        assert_eq!(config.burst.fade_frames, 20);
        assert_eq!(config.burst.palette.len(), 6);
        assert_eq!(config.view.fov_degrees, 75.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = SceneConfig::new().with_seed(3).with_burst(BurstConfig {
            gravity: 0.0,
            ..Default::default()
        });
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.burst.gravity, 0.0);
        assert_eq!(config.burst.drag, 0.98);
    }
}
