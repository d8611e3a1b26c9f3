/// Shape of a generated heightmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Every sample at mid height.
    Flat,
    /// Rising linearly from the first column to the last.
    Ramp,
    /// A single hill peaking at the grid center.
    Radial,
}

/// Generate `width * width` raw heightmap bytes in row-major order.
pub fn synthesize(width: u32, pattern: Pattern) -> Vec<u8> {
    let w = width as usize;
    let span = width.saturating_sub(1).max(1) as f32;
    let center = (width as f32 - 1.0) / 2.0;
    let max_dist = (2.0 * center * center).sqrt().max(f32::EPSILON);

    let mut bytes = Vec::with_capacity(w * w);
    for row in 0..width {
        for col in 0..width {
            let b = match pattern {
                Pattern::Flat => 128,
                Pattern::Ramp => (col as f32 / span * 255.0).round() as u8,
                Pattern::Radial => {
                    let dx = col as f32 - center;
                    let dz = row as f32 - center;
                    let t = 1.0 - (dx * dx + dz * dz).sqrt() / max_dist;
                    (t.clamp(0.0, 1.0) * 255.0).round() as u8
                }
            };
            bytes.push(b);
        }
    }
    bytes
}
