//! Weighted ridge regression used as the local surrogate model.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

const PIVOT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone)]
pub(crate) struct RidgeFit {
    pub(crate) coef: Array1<f64>,
    pub(crate) intercept: f64,
}

impl RidgeFit {
    /// Minimizes `sum w_i (y_i - x_i b - c)^2 + alpha |b|^2` with an unpenalized intercept.
    pub(crate) fn fit(
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        weights: ArrayView1<'_, f64>,
        alpha: f64,
    ) -> Self {
        let total_weight = weights.sum();
        let x_mean = x.t().dot(&weights) / total_weight;
        let y_mean = y.dot(&weights) / total_weight;

        let x_centered = &x - &x_mean.view().insert_axis(Axis(0));
        let y_centered = &y - y_mean;
        let x_weighted = &x_centered * &weights.insert_axis(Axis(1));

        let mut gram = x_weighted.t().dot(&x_centered);
        for i in 0..gram.nrows() {
            gram[[i, i]] += alpha;
        }
        let rhs = x_weighted.t().dot(&y_centered);

        let coef = solve(gram, rhs);
        let intercept = y_mean - x_mean.dot(&coef);
        Self { coef, intercept }
    }

    pub(crate) fn predict(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        x.dot(&self.coef) + self.intercept
    }

    /// Weighted coefficient of determination.
    pub(crate) fn score(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        weights: ArrayView1<'_, f64>,
    ) -> f64 {
        let predicted = self.predict(x);
        let y_mean = y.dot(&weights) / weights.sum();
        let mut residual = 0.0;
        let mut total = 0.0;
        for ((&target, &fitted), &w) in y.iter().zip(predicted.iter()).zip(weights.iter()) {
            residual += w * (target - fitted).powi(2);
            total += w * (target - y_mean).powi(2);
        }
        if total == 0.0 {
            return if residual == 0.0 { 1.0 } else { 0.0 };
        }
        1.0 - residual / total
    }
}

/// Gaussian elimination with partial pivoting. Columns whose pivot vanishes
/// get a zero coefficient.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Array1<f64> {
    let n = b.len();
    let mut skipped = vec![false; n];

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .unwrap_or(col);
        if a[[pivot_row, col]].abs() < PIVOT_EPSILON {
            skipped[col] = true;
            continue;
        }
        if pivot_row != col {
            for k in 0..n {
                a.swap([col, k], [pivot_row, k]);
            }
            b.swap(col, pivot_row);
        }
        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        if skipped[row] {
            continue;
        }
        let mut acc = b[row];
        for k in row + 1..n {
            acc -= a[[row, k]] * x[k];
        }
        x[row] = acc / a[[row, row]];
    }
    x
}
