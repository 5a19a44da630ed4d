//! Small dense exact-rational matrices with Gaussian elimination.
//!
//! The teacher's own `Matrix<R: ComRing>` (`src/rings/matrix.rs`) is a
//! `Vec`-backed dense matrix with row-reduction built in the same style;
//! this is a narrower, `Rational`-only cousin of it, sized for the small
//! (3×3, or Kronecker products of such) systems the sign-determination
//! algorithm builds. CARL solves the analogous systems over `float`
//! (Eigen `MatrixXf`); this workspace solves them exactly instead (see
//! SPEC_FULL.md §5), which is why this type exists independently of
//! `ranalg-poly`'s polynomial machinery.

use ranalg_nzq::Rational;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Rational>,
}

impl Matrix {
    pub fn zero(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![Rational::ZERO; rows * cols],
        }
    }

    pub fn from_rows(rows: Vec<Vec<Rational>>) -> Self {
        let r = rows.len();
        let c = rows.first().map(|row| row.len()).unwrap_or(0);
        assert!(rows.iter().all(|row| row.len() == c));
        let mut data = Vec::with_capacity(r * c);
        for row in rows {
            data.extend(row);
        }
        Matrix { rows: r, cols: c, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn at(&self, i: usize, j: usize) -> &Rational {
        &self.data[i * self.cols + j]
    }
    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut Rational {
        &mut self.data[i * self.cols + j]
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            *m.at_mut(i, i) = Rational::ONE;
        }
        m
    }

    /// The Kronecker product `self ⊗ other`.
    pub fn kronecker(&self, other: &Matrix) -> Matrix {
        let mut out = Matrix::zero(self.rows * other.rows, self.cols * other.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                let a = self.at(i, j).clone();
                if a == Rational::ZERO {
                    continue;
                }
                for k in 0..other.rows {
                    for l in 0..other.cols {
                        let v = a.clone() * other.at(k, l);
                        *out.at_mut(i * other.rows + k, j * other.cols + l) = v;
                    }
                }
            }
        }
        out
    }

    pub fn mul_vec(&self, v: &[Rational]) -> Vec<Rational> {
        assert_eq!(v.len(), self.cols);
        (0..self.rows)
            .map(|i| {
                let mut acc = Rational::ZERO;
                for j in 0..self.cols {
                    acc += self.at(i, j).clone() * &v[j];
                }
                acc
            })
            .collect()
    }

    /// Solves `self * x = rhs` for a square, invertible `self` via Gauss-Jordan
    /// elimination with partial pivoting over the exact rationals. Returns
    /// `None` if `self` is singular (not expected for the adapted matrices the
    /// sign-determination algorithm builds, which are invertible by construction).
    pub fn solve(&self, rhs: &[Rational]) -> Option<Vec<Rational>> {
        assert_eq!(self.rows, self.cols);
        assert_eq!(rhs.len(), self.rows);
        let n = self.rows;
        let mut aug = vec![Rational::ZERO; n * (n + 1)];
        for i in 0..n {
            for j in 0..n {
                aug[i * (n + 1) + j] = self.at(i, j).clone();
            }
            aug[i * (n + 1) + n] = rhs[i].clone();
        }
        for col in 0..n {
            let pivot_row = (col..n).find(|&r| aug[r * (n + 1) + col] != Rational::ZERO)?;
            for k in 0..=n {
                aug.swap(col * (n + 1) + k, pivot_row * (n + 1) + k);
            }
            let pivot = aug[col * (n + 1) + col].clone();
            for k in col..=n {
                aug[col * (n + 1) + k] = aug[col * (n + 1) + k].clone() / pivot.clone();
            }
            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = aug[r * (n + 1) + col].clone();
                if factor == Rational::ZERO {
                    continue;
                }
                for k in col..=n {
                    let sub = factor.clone() * aug[col * (n + 1) + k].clone();
                    aug[r * (n + 1) + k] = aug[r * (n + 1) + k].clone() - sub;
                }
            }
        }
        Some((0..n).map(|i| aug[i * (n + 1) + n].clone()).collect())
    }

    /// Determinant via Gaussian elimination (used only for small matrices).
    pub fn det(&self) -> Rational {
        assert_eq!(self.rows, self.cols);
        let n = self.rows;
        let mut m = self.data.clone();
        let mut det = Rational::ONE;
        for col in 0..n {
            let Some(pivot_row) = (col..n).find(|&r| m[r * n + col] != Rational::ZERO) else {
                return Rational::ZERO;
            };
            if pivot_row != col {
                for k in 0..n {
                    m.swap(col * n + k, pivot_row * n + k);
                }
                det = -det;
            }
            let pivot = m[col * n + col].clone();
            det = det * &pivot;
            for r in (col + 1)..n {
                let factor = m[r * n + col].clone() / pivot.clone();
                if factor == Rational::ZERO {
                    continue;
                }
                for k in col..n {
                    let sub = factor.clone() * m[col * n + k].clone();
                    m[r * n + k] = m[r * n + k].clone() - sub;
                }
            }
        }
        det
    }

    /// Rank via Gaussian elimination with partial pivoting over the exact
    /// rationals, for the (possibly non-square) linear-independence checks
    /// `adaptedFamily`'s `firstNLines` relies on.
    pub fn rank(&self) -> usize {
        let mut m = self.data.clone();
        let (rows, cols) = (self.rows, self.cols);
        let mut pivot_row = 0;
        for col in 0..cols {
            if pivot_row >= rows {
                break;
            }
            let Some(found) = (pivot_row..rows).find(|&r| m[r * cols + col] != Rational::ZERO) else {
                continue;
            };
            if found != pivot_row {
                for k in 0..cols {
                    m.swap(pivot_row * cols + k, found * cols + k);
                }
            }
            let pivot = m[pivot_row * cols + col].clone();
            for r in (pivot_row + 1)..rows {
                let factor = m[r * cols + col].clone() / pivot.clone();
                if factor == Rational::ZERO {
                    continue;
                }
                for k in col..cols {
                    let sub = factor.clone() * m[pivot_row * cols + k].clone();
                    m[r * cols + k] = m[r * cols + k].clone() - sub;
                }
            }
            pivot_row += 1;
        }
        pivot_row
    }

    pub fn trace(&self) -> Rational {
        assert_eq!(self.rows, self.cols);
        let mut acc = Rational::ZERO;
        for i in 0..self.rows {
            acc += self.at(i, i).clone();
        }
        acc
    }

    pub fn mul(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.cols, other.rows);
        let mut out = Matrix::zero(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.at(i, k).clone();
                if a == Rational::ZERO {
                    continue;
                }
                for j in 0..other.cols {
                    let v = a.clone() * other.at(k, j);
                    *out.at_mut(i, j) += v;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_identity() {
        let m = Matrix::identity(3);
        let rhs = vec![Rational::from(1), Rational::from(2), Rational::from(3)];
        assert_eq!(m.solve(&rhs).unwrap(), rhs);
    }

    #[test]
    fn kronecker_dimensions() {
        let a = Matrix::identity(2);
        let b = Matrix::identity(3);
        let k = a.kronecker(&b);
        assert_eq!(k.rows(), 6);
        assert_eq!(k.cols(), 6);
    }

    #[test]
    fn determinant_of_identity_is_one() {
        assert_eq!(Matrix::identity(4).det(), Rational::ONE);
    }

    #[test]
    fn rank_of_identity_is_full() {
        assert_eq!(Matrix::identity(3).rank(), 3);
    }

    #[test]
    fn rank_of_dependent_rows() {
        let m = Matrix::from_rows(vec![
            vec![Rational::from(1), Rational::from(2)],
            vec![Rational::from(2), Rational::from(4)],
        ]);
        assert_eq!(m.rank(), 1);
    }
}
