//! The scene context: both effects, the camera and the RNG behind one owner.
//!
//! A [`Scene`] replaces process-wide state. The host creates it, calls
//! [`tick`](Scene::tick) once per display refresh, forwards resize and pointer
//! updates, calls [`trigger`](Scene::trigger) when the user asks for a burst, and
//! finally [`dispose`](Scene::dispose)s it.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;

use crate::burst::{Burst, BurstState};
use crate::config::SceneConfig;
use crate::field::AmbientField;
use crate::gpu::Camera;
use crate::spawn::scene_rng;
use crate::visuals::PointStyle;

/// Owner of all effect state.
#[derive(Debug)]
pub struct Scene {
    field: AmbientField,
    burst: Burst,
    camera: Camera,
    pointer: Vec2,
    wave_time_scale: f32,
    background: Vec3,
    frames: u64,
    rng: StdRng,
}

impl Scene {
    /// Create a scene with the viewport size from `config.view`.
    pub fn new(config: SceneConfig) -> Self {
        let (width, height) = (config.view.width, config.view.height);
        Self::with_viewport(config, width, height)
    }

    /// Create a scene for a viewport of `width` x `height` pixels.
    pub fn with_viewport(config: SceneConfig, width: u32, height: u32) -> Self {
        let mut rng = scene_rng(config.seed);
        let wave_time_scale = config.field.wave_time_scale;
        let field = AmbientField::new(config.field, &mut rng);
        let camera = Camera::new(&config.view, width, height);

        log::debug!(
            "scene created: {} ambient points, {}x{} viewport",
            field.len(),
            width,
            height
        );

        Self {
            field,
            burst: Burst::new(config.burst),
            camera,
            pointer: Vec2::ZERO,
            wave_time_scale,
            background: config.view.background,
            frames: 0,
            rng,
        }
    }

    /// Advance one frame. `elapsed` is wall-clock seconds since the host started
    /// driving the scene.
    pub fn tick(&mut self, elapsed: f32) {
        let time = elapsed * self.wave_time_scale;
        self.field.advance(self.pointer, time, &mut self.rng);
        self.burst.advance();
        self.frames += 1;
    }

    /// Start a burst, replacing any burst still running.
    pub fn trigger(&mut self) {
        self.burst.trigger(&mut self.rng);
    }

    /// Match the camera to a new viewport size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.camera.resize(width, height) {
            log::debug!("viewport resized to {}x{}", width, height);
        }
    }

    /// Store the latest normalized pointer offset, read by the next tick.
    pub fn set_pointer_offset(&mut self, offset: Vec2) {
        self.pointer = offset;
    }

    /// Tear the scene down.
    pub fn dispose(mut self) {
        self.burst.clear();
        log::debug!("scene disposed after {} frames", self.frames);
    }

    #[inline]
    pub fn field(&self) -> &AmbientField {
        &self.field
    }

    /// Mutable access, for the renderer to clear the field's dirty flag.
    #[inline]
    pub fn field_mut(&mut self) -> &mut AmbientField {
        &mut self.field
    }

    /// The live burst, if any.
    #[inline]
    pub fn burst(&self) -> Option<&BurstState> {
        self.burst.state()
    }

    /// Number of bursts triggered so far.
    #[inline]
    pub fn bursts_triggered(&self) -> u64 {
        self.burst.generations()
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn pointer_offset(&self) -> Vec2 {
        self.pointer
    }

    /// Clear color.
    #[inline]
    pub fn background(&self) -> Vec3 {
        self.background
    }

    /// Material of the ambient layer.
    pub fn field_style(&self) -> PointStyle {
        self.field.style()
    }

    /// Material of the burst layer, if a burst is live.
    pub fn burst_style(&self) -> Option<PointStyle> {
        self.burst.style()
    }

    /// Frames ticked so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
