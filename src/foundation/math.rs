pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Premultiply a straight-alpha RGBA8 color.
pub(crate) fn premul_rgba8([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    let a16 = u16::from(a);
    let premul = |c: u8| mul_div255_u16(u16::from(c), a16) as u8;
    [premul(r), premul(g), premul(b), a]
}

/// Euclidean remainder that folds floating-point edge results back into `[0, m)`.
pub(crate) fn wrap_unit(t: f64, m: f64) -> f64 {
    let r = t.rem_euclid(m);
    if r >= m { 0.0 } else { r }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
