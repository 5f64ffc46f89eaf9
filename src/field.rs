//! The ambient field: a slowly turning cloud of points behind everything else.
//!
//! The cloud rotates as a rigid body (see [`AmbientField::model_matrix`]) while each
//! point bobs vertically on a traveling wave keyed to its horizontal position.
//! Points that drift past the vertical bound get a fresh random height; their x
//! and z stay put.

use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

use crate::config::FieldConfig;
use crate::spawn::{random_coordinate, random_in_cube};
use crate::visuals::PointStyle;

/// Background point cloud with a fixed particle count.
#[derive(Debug, Clone)]
pub struct AmbientField {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    /// Euler rotation in radians; x and y are used.
    rotation: Vec2,
    dirty: bool,
    config: FieldConfig,
}

impl AmbientField {
    /// Fill the cube with `config.count` random points, colored by index parity.
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, rng: &mut R) -> Self {
        let positions = (0..config.count)
            .map(|_| random_in_cube(rng, config.extent))
            .collect();
        let colors = (0..config.count)
            .map(|i| config.colors[i % 2])
            .collect();

        Self {
            positions,
            colors,
            rotation: Vec2::ZERO,
            dirty: true,
            config,
        }
    }

    /// Advance one frame.
    ///
    /// `pointer` is the normalized pointer offset in `[-0.5, 0.5]^2` and `time` the
    /// wave phase supplied by the frame driver.
    pub fn advance<R: Rng + ?Sized>(&mut self, pointer: Vec2, time: f32, rng: &mut R) {
        let cfg = &self.config;
        let steer = cfg.interaction * cfg.interaction_gain;

        self.rotation.y += cfg.spin_speed * 2.0 + pointer.x * steer;
        self.rotation.x += cfg.spin_speed + pointer.y * steer;

        for p in &mut self.positions {
            let phase = time + p.x * cfg.wave_frequency + p.z * cfg.wave_frequency;
            p.y += phase.sin() * cfg.wave_amplitude;

            if p.y > cfg.extent || p.y < -cfg.extent {
                p.y = random_coordinate(rng, cfg.extent);
            }
        }

        self.dirty = true;
    }

    /// Point positions in model space.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-point colors. Never change after creation.
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

    /// Accumulated rotation around x (`.x`) and y (`.y`), in radians.
    #[inline]
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    /// Rigid transform applied to the whole cloud when drawing.
    ///
    /// Rotation order is X then Y, matching an XYZ Euler rotation with z = 0.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation.x) * Mat4::from_rotation_y(self.rotation.y)
    }

    /// Material used to draw the field.
    pub fn style(&self) -> PointStyle {
        PointStyle {
            size: self.config.point_size,
            opacity: self.config.opacity,
        }
    }

    /// Returns whether positions changed since the last call, and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::scene_rng;

    fn field() -> (AmbientField, rand::rngs::StdRng) {
        let mut rng = scene_rng(Some(11));
        let field = AmbientField::new(FieldConfig::default(), &mut rng);
        (field, rng)
    }

    #[test]
    fn test_new_fills_cube() {
        let (field, _) = field();
        assert_eq!(field.len(), 2000);
        assert_eq!(field.colors().len(), 2000);
        assert!(field
            .positions()
            .iter()
            .all(|p| p.abs().max_element() <= 5.0));
    }

    #[test]
    fn test_colors_alternate_by_parity() {
        let (field, _) = field();
        let [even, odd] = FieldConfig::default().colors;
        for (i, c) in field.colors().iter().enumerate() {
            assert_eq!(*c, if i % 2 == 0 { even } else { odd });
        }
    }

    #[test]
    fn test_rotation_without_pointer() {
        let (mut field, mut rng) = field();
        field.advance(Vec2::ZERO, 0.0, &mut rng);
        assert!((field.rotation().y - 0.0001).abs() < 1e-9);
        assert!((field.rotation().x - 0.00005).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_steers_rotation() {
        let (mut field, mut rng) = field();
        field.advance(Vec2::new(0.5, -0.5), 0.0, &mut rng);
        // 0.0001 + 0.5 * 0.00005 * 20
        assert!((field.rotation().y - 0.0006).abs() < 1e-7);
        // 0.00005 - 0.5 * 0.00005 * 20
        assert!((field.rotation().x + 0.00045).abs() < 1e-7);
    }

    #[test]
    fn test_wave_moves_only_vertical_axis() {
        let (mut field, mut rng) = field();
        let before = field.positions().to_vec();
        field.advance(Vec2::ZERO, 1.25, &mut rng);

        for (a, b) in before.iter().zip(field.positions()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.z, b.z);
            let expected = a.y + (1.25 + a.x * 0.5 + a.z * 0.5).sin() * 0.001;
            if expected.abs() <= 5.0 {
                assert!((b.y - expected).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_respawns_height_only() {
        let mut rng = scene_rng(Some(5));
        let config = FieldConfig {
            count: 4,
            ..Default::default()
        };
        let mut field = AmbientField::new(config, &mut rng);
        field.positions[0] = Vec3::new(1.0, 5.0, 2.0);
        field.positions[1] = Vec3::new(-1.0, -5.0, -2.0);
        // Phases chosen so the wave pushes both points outward.
        let time_up = std::f32::consts::FRAC_PI_2 - 1.5;
        field.advance(Vec2::ZERO, time_up, &mut rng);

        let p = field.positions()[0];
        assert_eq!((p.x, p.z), (1.0, 2.0));
        assert!(p.y.abs() <= 5.0);
        for p in field.positions() {
            assert!(p.y.abs() <= 5.0);
        }
    }

    #[test]
    fn test_take_dirty() {
        let (mut field, mut rng) = field();
        assert!(field.take_dirty());
        assert!(!field.take_dirty());
        field.advance(Vec2::ZERO, 0.0, &mut rng);
        assert!(field.take_dirty());
    }
}
