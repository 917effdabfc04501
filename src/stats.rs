/// Summary statistics for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std_dev = if count > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            0.0
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Summary {
            count,
            mean,
            std_dev,
            min,
            max,
        })
    }
}

/// Pearson correlation; `NaN` when either side has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_a = a[..n].iter().sum::<f64>() / n as f64;
    let mean_b = b[..n].iter().sum::<f64>() / n as f64;
    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a[..n].iter().zip(&b[..n]) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }
    (cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0)
}

/// Full pairwise correlation matrix over `columns`.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let k = columns.len();
    let mut m = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        for j in i..k {
            let r = if i == j && Summary::compute(&columns[i]).is_some_and(|s| s.std_dev > 0.0) {
                1.0
            } else {
                pearson(&columns[i], &columns[j])
            };
            m[i][j] = r;
            m[j][i] = r;
        }
    }
    m
}

/// Sturges' rule: `ceil(log2(n)) + 1` bins.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Equal-width bin edges spanning `[min, max]`; a degenerate range is widened
/// by 0.5 on each side.
pub fn bin_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let bins = bins.max(1);
    let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
    let width = (hi - lo) / bins as f64;
    (0..=bins).map(|i| lo + width * i as f64).collect()
}

/// Count values per bin; the last bin is closed on the right.
pub fn histogram(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0usize; bins];
    if bins == 0 {
        return counts;
    }
    let lo = edges[0];
    let hi = edges[bins];
    let width = (hi - lo) / bins as f64;
    for &v in values {
        if v < lo || v > hi {
            continue;
        }
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

/// Gaussian kernel density estimate with Scott's bandwidth, evaluated at
/// `grid`. Returns `None` when the sample has no spread.
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Option<Vec<f64>> {
    let s = Summary::compute(values)?;
    if s.std_dev <= 0.0 {
        return None;
    }
    let n = s.count as f64;
    let h = s.std_dev * n.powf(-1.0 / 5.0);
    let norm = 1.0 / (n * h * (2.0 * std::f64::consts::PI).sqrt());
    Some(
        grid.iter()
            .map(|&g| {
                values
                    .iter()
                    .map(|&v| {
                        let z = (g - v) / h;
                        (-0.5 * z * z).exp()
                    })
                    .sum::<f64>()
                    * norm
            })
            .collect(),
    )
}

/// `points` evenly spaced values from `lo` to `hi` inclusive.
pub fn linspace(lo: f64, hi: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (points - 1) as f64;
            (0..points).map(|i| lo + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_column() {
        let s = Summary::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.count, 8);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
        assert!((s.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!(Summary::compute(&[]).is_none());
    }

    #[test]
    fn pearson_extremes() {
        let a = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&a, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&a, &[4.0, 3.0, 2.0, 1.0]) + 1.0).abs() < 1e-12);
        assert!(pearson(&a, &[1.0, 1.0, 1.0, 1.0]).is_nan());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let cols = vec![
            vec![1.0, 2.0, 3.0, 5.0],
            vec![2.0, 1.0, 4.0, 3.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ];
        let m = correlation_matrix(&cols);
        assert_eq!(m[0][0], 1.0);
        assert_eq!(m[1][1], 1.0);
        assert_eq!(m[0][1], m[1][0]);
        assert!(m[2][2].is_nan());
        assert!(m[0][2].is_nan());
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 10.0];
        let edges = bin_edges(0.0, 10.0, 5);
        assert_eq!(edges.len(), 6);
        let counts = histogram(&values, &edges);
        assert_eq!(counts, vec![2, 2, 1, 0, 1]);
        assert_eq!(counts.iter().sum::<usize>(), values.len());
    }

    #[test]
    fn degenerate_range_still_has_width() {
        let edges = bin_edges(3.0, 3.0, 2);
        assert_eq!(edges, vec![2.5, 3.0, 3.5]);
        assert_eq!(histogram(&[3.0, 3.0], &edges).iter().sum::<usize>(), 2);
    }

    #[test]
    fn kde_integrates_to_about_one() {
        let values: Vec<f64> = (0..50).map(|i| (i % 10) as f64).collect();
        let grid = linspace(-10.0, 20.0, 601);
        let density = gaussian_kde(&values, &grid).unwrap();
        let area: f64 = density.iter().sum::<f64>() * (grid[1] - grid[0]);
        assert!((area - 1.0).abs() < 0.01);
        assert!(gaussian_kde(&[1.0, 1.0], &grid).is_none());
    }

    #[test]
    fn sturges_rule() {
        assert_eq!(sturges_bins(0), 1);
        assert_eq!(sturges_bins(8), 4);
        assert_eq!(sturges_bins(768), 11);
    }
}
