//! Dense row-major matrix buffer.

use rand::Rng;
use rand_distr::StandardNormal;

/// An R×C matrix of `f64` stored row-major in one contiguous buffer.
///
/// Element (r, c) lives at index `r * cols + c`. The buffer length always
/// equals `rows * cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "expected {}x{}={} elements",
            rows,
            cols,
            rows * cols
        );
        Self { rows, cols, data }
    }

    /// Build a matrix from nested rows.
    ///
    /// ```
    /// use matbench::Matrix;
    ///
    /// let x = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(x.get(1, 0), 3.0);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), cols, "ragged rows: expected {} columns", cols);
            data.extend_from_slice(row);
        }
        Self::from_vec(rows.len(), cols, data)
    }

    /// Fill a matrix by evaluating `f(row, col)` for every element.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Matrix with elements drawn from the standard normal distribution.
    pub fn random_normal<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        Self {
            rows,
            cols,
            data: random_normal_vec(rows * cols, rng),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Element at (r, c).
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        assert!(
            r < self.rows && c < self.cols,
            "({}, {}) out of bounds for {}x{}",
            r,
            c,
            self.rows,
            self.cols
        );
        self.data[r * self.cols + c]
    }

    /// Row `r` as a slice of length `cols`.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

/// `len` samples from the standard normal distribution.
pub fn random_normal_vec<R: Rng>(len: usize, rng: &mut R) -> Vec<f64> {
    (0..len).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_row_major_layout() {
        let x = Matrix::from_fn(2, 3, |r, c| (r * 10 + c) as f64);
        assert_eq!(x.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(x.get(1, 2), 12.0);
        assert_eq!(x.row(1), &[10.0, 11.0, 12.0]);
        assert_eq!(x.shape(), (2, 3));
    }

    #[test]
    fn test_from_rows_matches_from_vec() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "expected 2x2=4 elements")]
    fn test_from_vec_rejects_wrong_length() {
        let _ = Matrix::from_vec(2, 2, vec![1.0; 3]);
    }

    #[test]
    fn test_empty_dimensions() {
        let x = Matrix::zeros(4, 0);
        assert!(x.as_slice().is_empty());
        assert_eq!(x.shape(), (4, 0));
    }

    #[test]
    fn test_random_normal_is_reproducible_with_seed() {
        let a = Matrix::random_normal(8, 8, &mut StdRng::seed_from_u64(42));
        let b = Matrix::random_normal(8, 8, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(a.as_slice().iter().all(|v| v.is_finite()));
    }
}
