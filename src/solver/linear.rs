//! Dense linear system and Gaussian elimination.

use std::fmt;

use super::PIVOT_TOLERANCE;
use crate::error::{CircuitError, Result};

/// Square linear system Ax = z over branch currents.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    /// System matrix A (row-major)
    pub a: Vec<f64>,
    /// Right-hand side z
    pub z: Vec<f64>,
    /// Solution vector x
    pub x: Vec<f64>,
    /// Matrix dimension
    pub size: usize,
    /// LU decomposition of A
    lu: Vec<f64>,
    /// Row permutation applied while pivoting
    pivots: Vec<usize>,
}

impl LinearSystem {
    /// Create a zeroed system of the given dimension.
    pub fn new(size: usize) -> Self {
        Self {
            a: vec![0.0; size * size],
            z: vec![0.0; size],
            x: vec![0.0; size],
            size,
            lu: vec![0.0; size * size],
            pivots: vec![0; size],
        }
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.a[row * self.size + col]
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.a[row * self.size + col] += value;
    }

    /// Add to right-hand side element.
    pub fn add_source(&mut self, row: usize, value: f64) {
        self.z[row] += value;
    }

    /// LU decomposition with partial pivoting.
    ///
    /// A pivot below [`PIVOT_TOLERANCE`] relative to the largest entry
    /// means the currents are not uniquely determined, which for these
    /// equations is a source shorted by zero-resistance wiring.
    pub fn factor(&mut self) -> Result<()> {
        let n = self.size;
        self.lu.copy_from_slice(&self.a);

        let scale = self.a.iter().fold(1.0_f64, |m, v| m.max(v.abs()));
        let tolerance = PIVOT_TOLERANCE * scale;

        for i in 0..n {
            self.pivots[i] = i;
        }

        for k in 0..n {
            // Find pivot
            let mut max_val = self.lu[k * n + k].abs();
            let mut max_row = k;

            for i in (k + 1)..n {
                let val = self.lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val < tolerance {
                log::debug!("short circuit: singular system at column {k}");
                return Err(CircuitError::ShortOrIncompleteCircuit);
            }

            if max_row != k {
                self.pivots.swap(k, max_row);
                for j in 0..n {
                    self.lu.swap(k * n + j, max_row * n + j);
                }
            }

            // Eliminate
            let pivot = self.lu[k * n + k];
            for i in (k + 1)..n {
                let factor = self.lu[i * n + k] / pivot;
                self.lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    self.lu[i * n + j] -= factor * self.lu[k * n + j];
                }
            }
        }

        Ok(())
    }

    /// Solve using the LU decomposition from [`factor`](Self::factor).
    pub fn solve(&mut self) -> Result<()> {
        let n = self.size;

        // Apply pivot permutation to z
        for i in 0..n {
            self.x[i] = self.z[self.pivots[i]];
        }

        // Forward substitution (L * y = Pz)
        for i in 0..n {
            for j in 0..i {
                self.x[i] -= self.lu[i * n + j] * self.x[j];
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                self.x[i] -= self.lu[i * n + j] * self.x[j];
            }
            let diag = self.lu[i * n + i];
            if diag == 0.0 {
                return Err(CircuitError::ShortOrIncompleteCircuit);
            }
            self.x[i] /= diag;
        }

        if self.x.iter().any(|v| !v.is_finite()) {
            log::debug!("short circuit: non-finite branch current");
            return Err(CircuitError::ShortOrIncompleteCircuit);
        }

        Ok(())
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            write!(f, "[")?;
            for col in 0..self.size {
                write!(f, " {:>9.4}", self.get(row, col))?;
            }
            writeln!(f, " ] = {:>9.4}", self.z[row])?;
        }
        Ok(())
    }
}
