// Re-export glam math stuff
pub use glam::*;

pub fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a + f * (b - a)
}

/// Mixes one colour channel of `src` over `dst`, `alpha` in 0..=1.
pub fn blend_channel(dst: u8, src: u8, alpha: f32) -> u8 {
    lerp(dst as f32, src as f32, alpha.clamp(0., 1.)).round() as u8
}
