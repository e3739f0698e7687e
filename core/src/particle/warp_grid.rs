//! Shape warp tables.

use crate::error::{Error, Result};
use crate::mist::*;

/// Number of grid points per axis of a warp table.
pub const WARP_GRID_SIZE: usize = 101;

/// A fixed 101×101 grid mapping two normalized coordinates in [0,1]² to a
/// shape-perturbation value by bilinear interpolation. One table each exists
/// for prolate and oblate spheroids; tables are read-only after load.
#[derive(Clone, Debug)]
pub struct WarpGrid {
    data: Box<[[Float; WARP_GRID_SIZE]; WARP_GRID_SIZE]>,
}

impl WarpGrid {
    /// Create a warp grid from raw table data. NaN entries are rejected as a
    /// configuration error.
    ///
    /// * `data` - The 101×101 table, indexed [row][column].
    pub fn new(data: Box<[[Float; WARP_GRID_SIZE]; WARP_GRID_SIZE]>) -> Result<Self> {
        if data.iter().flatten().any(|v| v.is_nan()) {
            return Err(Error::config("warp grid contains NaN"));
        }
        Ok(Self { data })
    }

    /// Create a warp grid by tabulating a function of the two normalized
    /// coordinates.
    ///
    /// * `f` - Function of (u, v) in [0,1]².
    pub fn tabulate<F>(f: F) -> Result<Self>
    where
        F: Fn(Float, Float) -> Float,
    {
        let step = 1.0 / (WARP_GRID_SIZE - 1) as Float;
        let mut data = Box::new([[0.0; WARP_GRID_SIZE]; WARP_GRID_SIZE]);
        for (i, row) in data.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = f(i as Float * step, j as Float * step);
            }
        }
        Self::new(data)
    }

    /// Create a constant warp grid.
    ///
    /// * `value` - The value at every grid point.
    pub fn flat(value: Float) -> Result<Self> {
        Self::tabulate(|_, _| value)
    }

    /// Bilinear lookup. Coordinates are clamped to [0, 1].
    ///
    /// * `u` - The first normalized coordinate (row axis).
    /// * `v` - The second normalized coordinate (column axis).
    pub fn lookup(&self, u: Float, v: Float) -> Float {
        let scale = (WARP_GRID_SIZE - 1) as Float;
        let x = clamp(u, 0.0, 1.0) * scale;
        let y = clamp(v, 0.0, 1.0) * scale;

        let i0 = min(x.floor() as usize, WARP_GRID_SIZE - 2);
        let j0 = min(y.floor() as usize, WARP_GRID_SIZE - 2);
        let tx = x - i0 as Float;
        let ty = y - j0 as Float;

        let r0 = lerp(ty, self.data[i0][j0], self.data[i0][j0 + 1]);
        let r1 = lerp(ty, self.data[i0 + 1][j0], self.data[i0 + 1][j0 + 1]);
        lerp(tx, r0, r1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn grid_points_are_exact() {
        let grid = WarpGrid::tabulate(|u, v| u + 2.0 * v).unwrap();
        assert!(approx_eq!(Float, grid.lookup(0.0, 0.0), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, grid.lookup(1.0, 0.0), 1.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, grid.lookup(0.0, 1.0), 2.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, grid.lookup(1.0, 1.0), 3.0, epsilon = 1e-12));
    }

    #[test]
    fn lookup_clamps_out_of_range_coordinates() {
        let grid = WarpGrid::tabulate(|u, _| u).unwrap();
        assert!(approx_eq!(Float, grid.lookup(-0.5, 0.5), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(Float, grid.lookup(1.5, 0.5), 1.0, epsilon = 1e-12));
    }

    #[test]
    fn nan_table_is_rejected() {
        let mut data = Box::new([[0.0; WARP_GRID_SIZE]; WARP_GRID_SIZE]);
        data[50][50] = f64::NAN;
        assert!(WarpGrid::new(data).is_err());
    }

    proptest! {
        #[test]
        fn bilinear_lookup_interpolates_linear_functions(
            u in 0.0..1.0f64,
            v in 0.0..1.0f64,
        ) {
            let grid = WarpGrid::tabulate(|a, b| 3.0 * a - b + 0.5).unwrap();
            let expected = 3.0 * u - v + 0.5;
            prop_assert!((grid.lookup(u, v) - expected).abs() < 1e-9);
        }
    }
}
