//! The celebratory burst: a one-shot radial explosion that falls, slows and fades.
//!
//! A [`Burst`] is a slot that is either empty or holds one [`BurstState`].
//! Triggering always replaces the slot's contents, so there is never more than one
//! live burst:
//!
//! ```text
//! Absent --trigger--> Active(life = lifespan) --advance--> ... --advance--> Absent
//!           ^                                   |
//!           +------------- trigger -------------+  (old set dropped)
//! ```

use glam::Vec3;
use rand::Rng;

use crate::config::BurstConfig;
use crate::spawn::{pick_color, radial_velocity};
use crate::visuals::PointStyle;

/// Opacity for a burst with `life` frames remaining.
///
/// Full opacity until the last `fade_frames` frames, then a linear ramp to zero.
/// Uses float division so the fade is smooth rather than stepped.
pub fn fade_opacity(life: u32, fade_frames: u32) -> f32 {
    if fade_frames == 0 || life >= fade_frames {
        1.0
    } else {
        life as f32 / fade_frames as f32
    }
}

/// Particles of one live burst.
#[derive(Debug, Clone)]
pub struct BurstState {
    generation: u64,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    colors: Vec<Vec3>,
    life: u32,
    opacity: f32,
}

impl BurstState {
    fn spawn<R: Rng + ?Sized>(config: &BurstConfig, generation: u64, rng: &mut R) -> Self {
        let mut velocities = Vec::with_capacity(config.count);
        let mut colors = Vec::with_capacity(config.count);

        for _ in 0..config.count {
            colors.push(pick_color(rng, &config.palette));
            velocities.push(radial_velocity(rng, config.min_speed, config.max_speed));
        }

        Self {
            generation,
            positions: vec![config.origin; config.count],
            velocities,
            colors,
            life: config.lifespan,
            opacity: 1.0,
        }
    }

    /// Identifies this set. Every trigger produces a new generation, which lets the
    /// renderer tell a restarted burst from a continuing one.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    #[inline]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Frames remaining.
    #[inline]
    pub fn life(&self) -> u32 {
        self.life
    }

    /// Current material opacity.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Slot holding at most one burst.
#[derive(Debug)]
pub struct Burst {
    config: BurstConfig,
    state: Option<BurstState>,
    generations: u64,
}

impl Burst {
    /// Create an empty slot.
    pub fn new(config: BurstConfig) -> Self {
        Self {
            config,
            state: None,
            generations: 0,
        }
    }

    /// Start a new burst, discarding the current one if it is still running.
    pub fn trigger<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generations += 1;
        let next = BurstState::spawn(&self.config, self.generations, rng);

        if let Some(previous) = self.state.replace(next) {
            log::debug!(
                "burst {} discarded with {} frames left",
                previous.generation,
                previous.life
            );
        }
        log::debug!(
            "burst {} started: {} particles, {} frames",
            self.generations,
            self.config.count,
            self.config.lifespan
        );
    }

    /// Advance one frame. Does nothing while absent.
    pub fn advance(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let cfg = &self.config;
        for (p, v) in state.positions.iter_mut().zip(state.velocities.iter_mut()) {
            v.y -= cfg.gravity;
            *v *= cfg.drag;
            *p += *v;
        }

        if state.life < cfg.fade_frames {
            state.opacity = fade_opacity(state.life, cfg.fade_frames);
        }

        state.life = state.life.saturating_sub(1);
        if state.life == 0 {
            log::debug!("burst {} finished", state.generation);
            self.state = None;
        }
    }

    /// Drop the current burst, if any.
    pub fn clear(&mut self) {
        if let Some(state) = self.state.take() {
            log::debug!("burst {} cleared", state.generation);
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// The live burst, if any.
    #[inline]
    pub fn state(&self) -> Option<&BurstState> {
        self.state.as_ref()
    }

    /// Number of bursts triggered so far.
    #[inline]
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Material for the live burst, if any.
    pub fn style(&self) -> Option<PointStyle> {
        self.state.as_ref().map(|state| PointStyle {
            size: self.config.point_size,
            opacity: state.opacity,
        })
    }

    pub fn config(&self) -> &BurstConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::scene_rng;

    #[test]
    fn test_fade_opacity() {
        assert_eq!(fade_opacity(60, 20), 1.0);
        assert_eq!(fade_opacity(20, 20), 1.0);
        assert!((fade_opacity(19, 20) - 0.95).abs() < 1e-6);
        assert!((fade_opacity(10, 20) - 0.5).abs() < 1e-6);
        assert_eq!(fade_opacity(0, 20), 0.0);
        assert_eq!(fade_opacity(3, 0), 1.0);
    }

    #[test]
    fn test_advance_while_absent_is_noop() {
        let mut burst = Burst::new(BurstConfig::default());
        burst.advance();
        assert!(!burst.is_active());
        assert!(burst.style().is_none());
    }

    #[test]
    fn test_trigger_spawns_at_origin() {
        let mut rng = scene_rng(Some(1));
        let mut burst = Burst::new(BurstConfig::default());
        burst.trigger(&mut rng);

        let state = burst.state().unwrap();
        assert_eq!(state.len(), 500);
        assert_eq!(state.life(), 60);
        assert_eq!(state.opacity(), 1.0);
        assert!(state.positions().iter().all(|p| *p == Vec3::ZERO));
    }

    #[test]
    fn test_colors_from_palette() {
        let mut rng = scene_rng(Some(2));
        let mut burst = Burst::new(BurstConfig::default());
        burst.trigger(&mut rng);

        let palette = &burst.config().palette;
        for c in burst.state().unwrap().colors() {
            assert!(palette.contains(c));
        }
    }

    #[test]
    fn test_first_advance_integrates_updated_velocity() {
        let mut rng = scene_rng(Some(3));
        let mut burst = Burst::new(BurstConfig::default());
        burst.trigger(&mut rng);

        let launch = burst.state().unwrap().velocities().to_vec();
        burst.advance();

        let state = burst.state().unwrap();
        for ((p, v), v0) in state.positions().iter().zip(state.velocities()).zip(&launch) {
            let expected = Vec3::new(v0.x, v0.y - 0.001, v0.z) * 0.98;
            assert!((*v - expected).length() < 1e-6);
            assert_eq!(*p, *v);
        }
        assert_eq!(state.life(), 59);
    }

    #[test]
    fn test_lifespan_ends_burst() {
        let mut rng = scene_rng(Some(4));
        let mut burst = Burst::new(BurstConfig::default());
        burst.trigger(&mut rng);

        for frame in 0..59 {
            burst.advance();
            assert!(burst.is_active(), "ended early at frame {frame}");
        }
        burst.advance();
        assert!(!burst.is_active());
    }

    #[test]
    fn test_opacity_ramp() {
        let mut rng = scene_rng(Some(5));
        let mut burst = Burst::new(BurstConfig::default());
        burst.trigger(&mut rng);

        // life 60..=20 before each advance keeps full opacity
        for _ in 0..41 {
            burst.advance();
            assert_eq!(burst.state().unwrap().opacity(), 1.0);
        }
        assert_eq!(burst.state().unwrap().life(), 19);

        let mut last = 1.0;
        while let Some(state) = burst.state() {
            let life = state.life();
            burst.advance();
            if let Some(state) = burst.state() {
                let expected = life as f32 / 20.0;
                assert!((state.opacity() - expected).abs() < 1e-6);
                assert!(state.opacity() < last);
                last = state.opacity();
            }
        }
    }

    #[test]
    fn test_retrigger_replaces_state() {
        let mut rng = scene_rng(Some(6));
        let mut burst = Burst::new(BurstConfig::default());
        burst.trigger(&mut rng);
        for _ in 0..30 {
            burst.advance();
        }
        let first = burst.state().unwrap().generation();

        burst.trigger(&mut rng);
        let state = burst.state().unwrap();
        assert_ne!(state.generation(), first);
        assert_eq!(state.life(), 60);
        assert!(state.positions().iter().all(|p| *p == Vec3::ZERO));
        assert_eq!(burst.generations(), 2);
    }

    #[test]
    fn test_clear() {
        let mut rng = scene_rng(Some(7));
        let mut burst = Burst::new(BurstConfig::default());
        burst.trigger(&mut rng);
        burst.clear();
        assert!(!burst.is_active());
        burst.clear();
    }
}
