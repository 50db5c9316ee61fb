//! Bounded sentiment scores from polarity values.
//!
//! Polarity itself comes from an external analyzer (see [`PolarityAnalyzer`]);
//! this module only weights, averages and squashes it.

/// Map an unbounded mean polarity into (-1, 1).
///
/// `1 - e^(-x)` for `x >= 0`, `e^x - 1` otherwise. Continuous and strictly
/// increasing, `0` maps to exactly `0`. The bounds are only approached;
/// in `f64` the result rounds to +/-1 once `|x|` exceeds about 37.
pub fn sentiment_score(x: f64) -> f64 {
    if x >= 0.0 {
        -(-x).exp_m1()
    } else {
        x.exp_m1()
    }
}

/// Scalar positivity/negativity of a piece of text.
pub trait PolarityAnalyzer {
    fn polarity(&self, text: &str) -> f64;
}

impl<F> PolarityAnalyzer for F
where
    F: Fn(&str) -> f64,
{
    fn polarity(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Weighted mean of `(polarity, weight)` pairs.
/// Returns 0.0 when there are no pairs or the total weight is zero.
pub fn weighted_mean_polarity(items: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = items.iter().map(|(_, w)| w).sum();
    if items.is_empty() || total_weight == 0.0 {
        return 0.0;
    }
    items.iter().map(|(p, w)| p * w).sum::<f64>() / total_weight
}

/// Score a batch of `(text, weight)` items: analyze each text, take the
/// weighted mean polarity, then squash it with [`sentiment_score`].
/// Weights are typically upvote scores.
pub fn aggregate_sentiment<A, S>(analyzer: &A, items: &[(S, f64)]) -> f64
where
    A: PolarityAnalyzer + ?Sized,
    S: AsRef<str>,
{
    let pairs: Vec<(f64, f64)> = items
        .iter()
        .map(|(text, w)| (analyzer.polarity(text.as_ref()), *w))
        .collect();
    sentiment_score(weighted_mean_polarity(&pairs))
}
