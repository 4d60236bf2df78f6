//! Sparse matrices and linear solvers.
//!
//! This module provides a lightweight sparse matrix (CSR format) built from
//! coordinate triplets, a dense QR least-squares solve for small and
//! non-symmetric systems, and a conjugate gradient solver for symmetric
//! positive definite systems.

use nalgebra::{DMatrix, DVector};

use crate::error::{EmbedError, Result};

/// Relative pivot threshold below which an R factor is treated as singular.
const SINGULAR_PIVOT: f64 = 1e-12;

/// Compressed Sparse Row (CSR) matrix.
#[derive(Debug, Clone)]
pub struct CsrMatrix {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Row pointers: row_ptr[i] is the index in col_idx/values where row i starts.
    /// Length is rows + 1, with row_ptr[rows] = nnz.
    row_ptr: Vec<usize>,
    /// Column indices for each non-zero value.
    col_idx: Vec<usize>,
    /// Non-zero values.
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Create a CSR matrix from triplets (row, col, value).
    ///
    /// Duplicate entries at the same (row, col) are summed. Triplets outside
    /// the matrix bounds are ignored.
    pub fn from_triplets(rows: usize, cols: usize, mut triplets: Vec<(usize, usize, f64)>) -> Self {
        triplets.retain(|&(r, c, _)| r < rows && c < cols);
        triplets.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut row_counts = vec![0usize; rows];
        let mut col_idx: Vec<usize> = Vec::with_capacity(triplets.len());
        let mut values: Vec<f64> = Vec::with_capacity(triplets.len());
        let mut last: Option<(usize, usize)> = None;

        for (row, col, val) in triplets {
            if last == Some((row, col)) {
                // Same position: accumulate value
                if let Some(acc) = values.last_mut() {
                    *acc += val;
                }
            } else {
                col_idx.push(col);
                values.push(val);
                row_counts[row] += 1;
                last = Some((row, col));
            }
        }

        let mut row_ptr = Vec::with_capacity(rows + 1);
        row_ptr.push(0);
        for count in row_counts {
            let start = row_ptr[row_ptr.len() - 1];
            row_ptr.push(start + count);
        }

        Self {
            rows,
            cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Get the number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Get the number of non-zero entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Entries of one row as `(col, value)` pairs.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.row_ptr[i]..self.row_ptr[i + 1];
        self.col_idx[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// Value at (row, col), zero when not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.row(row)
            .find(|&(c, _)| c == col)
            .map_or(0.0, |(_, v)| v)
    }

    /// Multiply matrix by vector: y = A * x.
    pub fn mul_vec(&self, x: &DVector<f64>) -> DVector<f64> {
        assert_eq!(x.len(), self.cols, "Vector dimension mismatch");

        let mut y = DVector::zeros(self.rows);
        for i in 0..self.rows {
            y[i] = self.row(i).map(|(c, v)| v * x[c]).sum();
        }
        y
    }

    /// Expand into a dense matrix.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.rows, self.cols);
        for i in 0..self.rows {
            for (c, v) in self.row(i) {
                dense[(i, c)] = v;
            }
        }
        dense
    }
}

/// Solve the square system A*x = b by QR decomposition.
///
/// Suitable for non-symmetric systems. The matrix is densified, so this is
/// meant for systems of moderate size.
///
/// # Errors
///
/// Returns [`EmbedError::SingularSystem`] if the R factor has a vanishing
/// pivot or the solution is not finite.
pub fn solve_qr(a: &CsrMatrix, b: &DVector<f64>) -> Result<DVector<f64>> {
    let n = b.len();
    assert_eq!(a.nrows(), n, "Matrix-vector dimension mismatch");
    assert_eq!(a.ncols(), n, "Matrix must be square");

    if n == 0 {
        return Ok(DVector::zeros(0));
    }

    let qr = a.to_dense().qr();

    let r = qr.r();
    let scale = r.diagonal().amax();
    if scale == 0.0
        || r.diagonal()
            .iter()
            .any(|d| d.abs() <= scale * SINGULAR_PIVOT)
    {
        return Err(EmbedError::SingularSystem);
    }

    let x = qr.solve(b).ok_or(EmbedError::SingularSystem)?;
    if x.iter().any(|v| !v.is_finite()) {
        return Err(EmbedError::SingularSystem);
    }
    Ok(x)
}

/// Solve A*x = b using the Conjugate Gradient method.
///
/// Requires A to be symmetric positive definite.
///
/// # Arguments
///
/// * `a` - The system matrix (must be symmetric positive definite)
/// * `b` - The right-hand side vector
/// * `x0` - Optional initial guess (zeros if None)
/// * `max_iter` - Maximum number of iterations
/// * `tolerance` - Convergence tolerance (relative residual norm)
///
/// # Returns
///
/// The solution vector x, or an error if convergence fails.
pub fn conjugate_gradient(
    a: &CsrMatrix,
    b: &DVector<f64>,
    x0: Option<&DVector<f64>>,
    max_iter: usize,
    tolerance: f64,
) -> Result<DVector<f64>> {
    let n = b.len();
    assert_eq!(a.nrows(), n, "Matrix-vector dimension mismatch");
    assert_eq!(a.ncols(), n, "Matrix must be square");

    let mut x = match x0 {
        Some(x0) => x0.clone(),
        None => DVector::zeros(n),
    };

    let b_norm = b.norm();
    if b_norm < 1e-15 {
        return Ok(DVector::zeros(n));
    }

    // r = b - A*x
    let mut r = b - a.mul_vec(&x);
    let mut r_norm_sq = r.dot(&r);
    if r_norm_sq.sqrt() / b_norm < tolerance {
        return Ok(x);
    }

    let mut p = r.clone();

    for _ in 0..max_iter {
        let ap = a.mul_vec(&p);

        let p_ap = p.dot(&ap);
        if p_ap.abs() < 1e-15 {
            // Matrix might be singular or nearly so
            break;
        }
        let alpha = r_norm_sq / p_ap;

        x += alpha * &p;
        r -= alpha * &ap;

        let new_r_norm_sq = r.dot(&r);
        if new_r_norm_sq.sqrt() / b_norm < tolerance {
            return Ok(x);
        }

        let beta = new_r_norm_sq / r_norm_sq;
        p = &r + beta * &p;
        r_norm_sq = new_r_norm_sq;
    }

    Err(EmbedError::ConvergenceFailed {
        iterations: max_iter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spd_2x2() -> CsrMatrix {
        // [ 4  1 ]
        // [ 1  3 ]
        CsrMatrix::from_triplets(2, 2, vec![(0, 0, 4.0), (0, 1, 1.0), (1, 0, 1.0), (1, 1, 3.0)])
    }

    #[test]
    fn test_csr_from_triplets() {
        let a = spd_2x2();
        assert_eq!(a.nrows(), 2);
        assert_eq!(a.ncols(), 2);
        assert_eq!(a.nnz(), 4);
        assert_eq!(a.get(0, 1), 1.0);
    }

    #[test]
    fn test_csr_duplicates_summed() {
        let triplets = vec![(1, 1, 3.0), (0, 0, 2.0), (0, 1, 1.0), (0, 0, 2.0), (1, 0, 1.0)];
        let a = CsrMatrix::from_triplets(2, 2, triplets);

        assert_eq!(a.nnz(), 4);
        assert!((a.get(0, 0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_csr_empty_rows() {
        // Row 1 has no entries
        let a = CsrMatrix::from_triplets(3, 3, vec![(0, 0, 1.0), (2, 2, 5.0)]);
        assert_eq!(a.row(1).count(), 0);
        assert_eq!(a.get(2, 2), 5.0);

        let y = a.mul_vec(&DVector::from_vec(vec![1.0, 1.0, 1.0]));
        assert_eq!(y.as_slice(), &[1.0, 0.0, 5.0]);
    }

    #[test]
    fn test_csr_mul_vec() {
        let a = spd_2x2();
        let y = a.mul_vec(&DVector::from_vec(vec![1.0, 1.0]));
        assert!((y[0] - 5.0).abs() < 1e-10);
        assert!((y[1] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_qr_non_symmetric() {
        // [ 1  -0.5 ]   [ x ]   [ 0.25 ]
        // [ -1  1   ] * [ y ] = [ 0.5  ]
        let a = CsrMatrix::from_triplets(2, 2, vec![(0, 0, 1.0), (0, 1, -0.5), (1, 0, -1.0), (1, 1, 1.0)]);
        let b = DVector::from_vec(vec![0.25, 0.5]);
        let x = solve_qr(&a, &b).unwrap();

        let residual = a.mul_vec(&x) - b;
        assert!(residual.norm() < 1e-12);
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_qr_singular() {
        let a = CsrMatrix::from_triplets(2, 2, vec![(0, 0, 1.0), (0, 1, -1.0), (1, 0, -1.0), (1, 1, 1.0)]);
        let b = DVector::from_vec(vec![0.0, 0.0]);
        assert!(matches!(solve_qr(&a, &b), Err(EmbedError::SingularSystem)));
    }

    #[test]
    fn test_qr_empty() {
        let a = CsrMatrix::from_triplets(0, 0, Vec::new());
        let x = solve_qr(&a, &DVector::zeros(0)).unwrap();
        assert_eq!(x.len(), 0);
    }

    #[test]
    fn test_cg_simple() {
        // Solution: x = 1/11, y = 7/11
        let a = spd_2x2();
        let b = DVector::from_vec(vec![1.0, 2.0]);

        let x = conjugate_gradient(&a, &b, None, 100, 1e-10).unwrap();
        assert!((x[0] - 1.0 / 11.0).abs() < 1e-8);
        assert!((x[1] - 7.0 / 11.0).abs() < 1e-8);
    }

    #[test]
    fn test_cg_with_initial_guess() {
        let a = spd_2x2();
        let b = DVector::from_vec(vec![1.0, 2.0]);
        let x0 = DVector::from_vec(vec![0.1, 0.6]);

        let x = conjugate_gradient(&a, &b, Some(&x0), 100, 1e-10).unwrap();
        let residual = a.mul_vec(&x) - b;
        assert!(residual.norm() < 1e-8);
    }

    #[test]
    fn test_cg_iteration_limit() {
        let triplets = (0..4)
            .flat_map(|i| {
                let mut row = vec![(i, i, 10.0)];
                if i + 1 < 4 {
                    row.push((i, i + 1, 1.0));
                    row.push((i + 1, i, 1.0));
                }
                row
            })
            .collect();
        let a = CsrMatrix::from_triplets(4, 4, triplets);
        let b = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);

        assert!(matches!(
            conjugate_gradient(&a, &b, None, 1, 1e-14),
            Err(EmbedError::ConvergenceFailed { iterations: 1 })
        ));
    }
}
