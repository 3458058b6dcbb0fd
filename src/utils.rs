use glam::{Vec2, Vec4};
use rand::Rng;

// --- Helper Functions ---

/// Builds an opaque colour from a `0xRRGGBB` literal.
pub const fn rgb(hex: u32) -> Vec4 {
    Vec4::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    )
}

pub fn with_alpha(color: Vec4, alpha: f32) -> Vec4 {
    Vec4::new(color.x, color.y, color.z, alpha.clamp(0.0, 1.0))
}

/// Linear blend of the RGB channels; alpha is taken from `base`.
pub fn mix_rgb(base: Vec4, toward: Vec4, amount: f32) -> Vec4 {
    let t = amount.clamp(0.0, 1.0);
    let blended = base.truncate().lerp(toward.truncate(), t);
    blended.extend(base.w)
}

pub fn pick_color<R: Rng + ?Sized>(rng: &mut R, palette: &[Vec4]) -> Vec4 {
    if palette.is_empty() {
        return Vec4::ONE;
    }
    palette[rng.gen_range(0..palette.len())]
}

/// Uniform sample in `[-half_range, half_range)`.
pub fn random_signed<R: Rng + ?Sized>(rng: &mut R, half_range: f32) -> f32 {
    if half_range <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half_range..half_range)
}

/// One step of exponential smoothing: `value += (target - value) * factor`.
#[inline]
pub fn ease_toward(value: f32, target: f32, factor: f32) -> f32 {
    value + (target - value) * factor
}

#[inline]
pub fn ease_vec_toward(value: Vec2, target: Vec2, factor: f32) -> Vec2 {
    value + (target - value) * factor
}
