/// Compute the squared Euclidean distance between two vectors.
///
/// This is the distance reported by flat L2 indexes: no square root is
/// taken. For unit vectors the result lies in `[0, 4]`, with orthogonal
/// vectors at 2.
///
/// Uses f64 intermediate precision.
/// Returns `f32::INFINITY` on dimension mismatch.
pub fn l2_squared(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }

    let mut sum: f64 = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let d = x as f64 - y as f64;
        sum += d * d;
    }
    sum as f32
}

/// Euclidean norm of `v`, accumulated in f64.
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>().sqrt()
}
