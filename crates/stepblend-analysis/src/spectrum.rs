// ─────────────────────────────────────────────────────────────────────
// StepBlend — Frequency Spectrum
// ─────────────────────────────────────────────────────────────────────
//! 2-D DFT of a luma plane and the high/total spectral energy ratio.
//!
//! The transform is separable: one batched row pass, a transpose, one
//! batched column pass. Plans are built once per frame size and shared
//! across worker threads.

use std::fmt;
use std::sync::Arc;

use ndarray::{s, Array2};
use num_complex::Complex32;
use rustfft::{Fft, FftPlanner};

/// Reusable forward 2-D FFT for one `(rows, cols)` size.
#[derive(Clone)]
pub struct SpectrumPlan {
    rows: usize,
    cols: usize,
    row_fft: Arc<dyn Fft<f32>>,
    col_fft: Arc<dyn Fft<f32>>,
}

impl fmt::Debug for SpectrumPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrumPlan")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}

impl SpectrumPlan {
    /// Both dimensions must be non-zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        Self {
            rows,
            cols,
            row_fft: planner.plan_fft_forward(cols),
            col_fft: planner.plan_fft_forward(rows),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Unnormalized forward DFT, `(rows, cols)` layout.
    pub fn fft2(&self, plane: &Array2<f32>) -> Array2<Complex32> {
        debug_assert_eq!(plane.dim(), (self.rows, self.cols));
        let (rows, cols) = (self.rows, self.cols);

        let mut buf: Vec<Complex32> = plane.iter().map(|&v| Complex32::new(v, 0.0)).collect();
        // process() walks the buffer in chunks of the planned length
        self.row_fft.process(&mut buf);

        let mut transposed = vec![Complex32::new(0.0, 0.0); rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                transposed[c * rows + r] = buf[r * cols + c];
            }
        }
        self.col_fft.process(&mut transposed);

        Array2::from_shape_fn((rows, cols), |(r, c)| transposed[c * rows + r])
    }

    /// Centred log-magnitude spectrum `20 · ln(|F| + 1)`.
    pub fn magnitude_spectrum(&self, plane: &Array2<f32>) -> Array2<f64> {
        let spectrum = self.fft2(plane).mapv(|z| 20.0 * (f64::from(z.norm()) + 1.0).ln());
        fft_shift(&spectrum)
    }
}

/// Move the zero-frequency bin to `(rows / 2, cols / 2)`.
pub fn fft_shift<T: Clone>(a: &Array2<T>) -> Array2<T> {
    let (rows, cols) = a.dim();
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        a[[(i + rows - rows / 2) % rows, (j + cols - cols / 2) % cols]].clone()
    })
}

/// Share of spectral energy outside the central low-frequency square.
///
/// The square spans `[centre - r, centre + r)` on both axes with
/// `r = min(rows, cols) / divisor`, clipped to the plane. Returns `None`
/// when the spectrum carries no energy at all.
pub fn high_frequency_ratio(spectrum: &Array2<f64>, divisor: usize) -> Option<f64> {
    let (rows, cols) = spectrum.dim();
    let total: f64 = spectrum.sum();
    if total <= 0.0 {
        return None;
    }

    let radius = rows.min(cols) / divisor.max(1);
    let (crow, ccol) = (rows / 2, cols / 2);
    let low: f64 = spectrum
        .slice(s![
            crow.saturating_sub(radius)..(crow + radius).min(rows),
            ccol.saturating_sub(radius)..(ccol + radius).min(cols)
        ])
        .sum();

    Some((total - low) / total)
}
