/// Raw logits are turned into probabilities; outputs that already look like
/// a distribution are left alone.
pub fn to_probabilities(scores: &[f32]) -> Vec<f32> {
    let in_unit_range = scores.iter().all(|s| (0.0..=1.0).contains(s));
    let sum: f32 = scores.iter().sum();

    if in_unit_range && (sum - 1.0).abs() < 1e-3 {
        return scores.to_vec();
    }

    softmax(scores)
}

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    if sum <= 0.0 || !sum.is_finite() {
        return vec![0.0; scores.len()];
    }

    exps.into_iter().map(|e| e / sum).collect()
}

/// Index and score of the highest non-NaN entry.
pub fn top_prediction(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .max_by(|a, b| a.1.total_cmp(&b.1))
}
