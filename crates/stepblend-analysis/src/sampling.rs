// ─────────────────────────────────────────────────────────────────────
// StepBlend — Frame Sampling
// ─────────────────────────────────────────────────────────────────────

/// Deterministic frame subset for analysis.
///
/// Batches of at most `max_samples` frames are used whole. Longer batches
/// are strided by `total / max_samples` from index 0 and truncated to
/// `max_samples` entries.
pub fn sample_indices(total: usize, max_samples: usize) -> Vec<usize> {
    let max_samples = max_samples.max(1);
    if total <= max_samples {
        return (0..total).collect();
    }
    let stride = total / max_samples;
    (0..total).step_by(stride).take(max_samples).collect()
}
