use serde::Serialize;

pub const HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub range_start: f64,
    pub range_end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn label(&self) -> String {
        format!("{:.2} - {:.2}", self.range_start, self.range_end)
    }
}

/// Splits `[min, max]` into `bins` equal-width bins, each half-open except the
/// last, which also takes `max`. Neighbouring bins share one edge value so a
/// value can never fall between or into two bins.
///
/// When every value is equal, all bins collapse to `[min, min]` and every
/// value is counted in bin 0.
pub fn build(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if min == max {
        let mut out: Vec<HistogramBin> = (0..bins)
            .map(|_| HistogramBin { range_start: min, range_end: min, count: 0 })
            .collect();
        out[0].count = values.len();
        return out;
    }

    let width = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|k| min + k as f64 * width).collect();
    edges.push(max);

    let mut counts = vec![0usize; bins];
    let inner = &edges[1..bins];
    for &v in values {
        counts[inner.partition_point(|&edge| edge <= v)] += 1;
    }

    edges
        .windows(2)
        .zip(counts)
        .map(|(edge, count)| HistogramBin {
            range_start: edge[0],
            range_end: edge[1],
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_through_ten() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let bins = build(&values, HISTOGRAM_BINS);

        assert_eq!(bins.len(), 10);
        assert!(bins.iter().all(|b| b.count == 1));
        assert_eq!(bins[0].range_start, 1.0);
        assert!((bins[0].range_end - 1.9).abs() < 1e-9);
        assert!((bins[9].range_start - 9.1).abs() < 1e-9);
        assert_eq!(bins[9].range_end, 10.0);
        assert_eq!(bins[0].label(), "1.00 - 1.90");
        assert_eq!(bins[9].label(), "9.10 - 10.00");
    }

    #[test]
    fn max_lands_in_last_bin() {
        let bins = build(&[0.0, 0.0, 5.0, 10.0, 10.0], HISTOGRAM_BINS);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[5].count, 1);
        assert_eq!(bins[9].count, 2);
    }

    #[test]
    fn counts_sum_to_len() {
        let values = [0.1, 0.2, 0.3, 0.3, 0.7, 1.1, 2.9, 3.3, 3.3, -4.2, 0.0, 7.77];
        let bins = build(&values, HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
    }

    #[test]
    fn bins_are_contiguous() {
        let values = [0.1, 0.7, 0.3, 0.3];
        let bins = build(&values, HISTOGRAM_BINS);
        for pair in bins.windows(2) {
            assert_eq!(pair[0].range_end, pair[1].range_start);
        }
    }

    #[test]
    fn value_on_inner_edge_goes_right() {
        // width 1.0, so 3.0 starts bin 3
        let values = [0.0, 3.0, 3.0, 10.0];
        let bins = build(&values, HISTOGRAM_BINS);
        assert_eq!(bins[2].count, 0);
        assert_eq!(bins[3].count, 2);
    }

    #[test]
    fn equal_values_fill_first_bin() {
        let bins = build(&[4.0, 4.0, 4.0], HISTOGRAM_BINS);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins[0].count, 3);
        assert!(bins[1..].iter().all(|b| b.count == 0));
        assert!(bins.iter().all(|b| b.range_start == 4.0 && b.range_end == 4.0));
    }

    #[test]
    fn empty_input_has_no_bins() {
        assert!(build(&[], HISTOGRAM_BINS).is_empty());
    }
}
