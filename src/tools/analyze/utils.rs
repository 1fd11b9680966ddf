use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid integer regex"));
static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid decimal regex"));
static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+").expect("valid leading integer regex"));

/// First run of digits anywhere in `text`.
pub(super) fn first_integer(text: &str) -> Option<u64> {
    INTEGER.find(text)?.as_str().parse().ok()
}

/// First number (optionally with a fraction) anywhere in `text`.
pub(super) fn first_decimal(text: &str) -> Option<f64> {
    DECIMAL.find(text)?.as_str().parse().ok()
}

/// Digits at the very start of the trimmed text (`"18 (typical)"` gives 18).
pub(super) fn leading_integer(text: &str) -> Option<u64> {
    LEADING_INTEGER.find(text.trim())?.as_str().parse().ok()
}

/// Product of the first three numbers in a size like `"155 x 48 x 52mm"`.
pub(super) fn volume_mm3(size: &str) -> Option<f64> {
    let dims: Vec<f64> = DECIMAL
        .find_iter(size)
        .take(3)
        .map(|m| m.as_str().parse().ok())
        .collect::<Option<_>>()?;
    (dims.len() == 3).then(|| dims.iter().product())
}

/// Scale `values` into `0..=1`; a constant column maps to all zeros.
pub(super) fn min_max(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|v| if range > 0.0 { (v - min) / range } else { 0.0 })
        .collect()
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

/// Prim's algorithm over the complete Euclidean graph of `coords`.
///
/// Returns `(i, j, length)` with `i < j`, sorted by `(i, j)`. Ties go to the
/// lowest index, so the tree is stable for a given input order.
pub(super) fn minimum_spanning_tree(coords: &[[f64; 2]]) -> Vec<(usize, usize, f64)> {
    let n = coords.len();
    if n < 2 {
        return vec![];
    }

    let mut in_tree = vec![false; n];
    let mut best = vec![f64::INFINITY; n];
    let mut parent = vec![0usize; n];
    let mut edges = Vec::with_capacity(n - 1);

    in_tree[0] = true;
    for j in 1..n {
        best[j] = distance(coords[0], coords[j]);
    }

    for _ in 1..n {
        let Some(next) = (0..n)
            .filter(|&j| !in_tree[j])
            .min_by(|&a, &b| best[a].total_cmp(&best[b]))
        else {
            break;
        };
        in_tree[next] = true;
        let from = parent[next];
        edges.push((from.min(next), from.max(next), best[next]));

        for j in 0..n {
            if !in_tree[j] {
                let d = distance(coords[next], coords[j]);
                if d < best[j] {
                    best[j] = d;
                    parent[j] = next;
                }
            }
        }
    }

    edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    edges
}
