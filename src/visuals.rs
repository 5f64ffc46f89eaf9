//! Colors and blending for point rendering.
//!
//! Colors are stored as linear RGB in `0.0..=1.0`, converted from the hex values
//! the palette is authored in.

use glam::Vec3;

/// Main ambient color (even particle indices).
pub const AMBIENT_PRIMARY: u32 = 0x4c7cff;

/// Ambient accent color (odd particle indices).
pub const AMBIENT_ACCENT: u32 = 0xff4c7c;

/// Festive palette burst particles pick from.
pub const BURST_PALETTE: [u32; 6] = [0xff4c7c, 0x4c7cff, 0x00ffff, 0xffff00, 0xffa500, 0xffffff];

/// Clear color of the render target.
pub const BACKGROUND: u32 = 0x0d0d1a;

/// Convert a `0xRRGGBB` value into an RGB vector.
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// Additive blend state shared by both point layers.
///
/// Overlapping points brighten instead of occluding each other, which gives the
/// glow of the field and the burst.
pub fn additive_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Per-layer material: how big and how opaque a point set is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    /// Point size in world units.
    pub size: f32,
    /// Layer opacity, multiplied into every fragment.
    pub opacity: f32,
}
