//! Linear interpolation in tabulated data.
//!
//! Both routines clamp to the first or last tabulated value
//! when the query point lies outside the grid.

/// Index of the lower of the two grid points that bracket `x`,
/// and the weight of the upper one
fn bracket(x: f64, xs: &[f64]) -> (usize, f64) {
    debug_assert!(!xs.is_empty());
    let last = xs.len() - 1;

    if last == 0 || x <= xs[0] {
        return (0, 0.0);
    }

    if x >= xs[last] {
        return (last - 1, 1.0);
    }

    // first i such that xs[i] > x, guaranteed to be in 1..=last
    let i = xs.partition_point(|&v| v <= x);
    let weight = (x - xs[i-1]) / (xs[i] - xs[i-1]);
    (i - 1, weight)
}

/// Evaluates the function tabulated as `ys` on the grid `xs` at `x`
pub fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let (i, w) = bracket(x, xs);
    let j = (i + 1).min(xs.len() - 1);
    (1.0 - w) * ys[i] + w * ys[j]
}

/// Evaluates the function tabulated on the grid `xs` × `ys` at (`x`, `y`).
/// The table `zs` is ordered such that `zs[i * ys.len() + j]`
/// is the value at (`xs[i]`, `ys[j]`).
pub fn interpolate2d(x: f64, y: f64, xs: &[f64], ys: &[f64], zs: &[f64]) -> f64 {
    let ny = ys.len();
    let (ix, wx) = bracket(x, xs);
    let (iy, wy) = bracket(y, ys);
    let jx = (ix + 1).min(xs.len() - 1);
    let jy = (iy + 1).min(ny - 1);

    (1.0 - wx) * (1.0 - wy) * zs[ix * ny + iy]
    + (1.0 - wx) * wy * zs[ix * ny + jy]
    + wx * (1.0 - wy) * zs[jx * ny + iy]
    + wx * wy * zs[jx * ny + jy]
}
