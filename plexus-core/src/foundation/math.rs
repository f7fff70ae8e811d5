/// Linear interpolation between `a` and `b`, `t` clamped to `[0, 1]`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

/// `(x * y) / 255` with rounding, for 8-bit channel math.
pub fn mul_div255_u16(x: u16, y: u16) -> u16 {
    let t = u32::from(x) * u32::from(y) + 128;
    ((t + (t >> 8)) >> 8) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
