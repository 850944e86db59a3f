// ─────────────────────────────────────────────────────────────────────
// StepBlend — Image Batch
// ─────────────────────────────────────────────────────────────────────
//! Read-only `(N, H, W, C)` image batch with values in [0, 1].

use ndarray::{Array2, Array3, Array4, ArrayView3, Axis, Zip};

use stepblend_types::{BlendError, BlendResult};

/// Rec. 601 luma weights.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Batch of frames in `(N, H, W, C)` layout.
///
/// Construction guarantees every frame shares one shape. Channel count
/// and spatial size are only checked by the analyzer, so a malformed
/// tensor degrades the adaptive step instead of failing the call.
#[derive(Debug, Clone)]
pub struct ImageBatch {
    data: Array4<f32>,
}

impl ImageBatch {
    /// Wrap a float tensor already normalized to [0, 1].
    pub fn from_array(data: Array4<f32>) -> Self {
        Self { data }
    }

    /// Rescale an integer-encoded tensor by `1/255`.
    ///
    /// Wider integer types are scaled the same way as 8-bit data; values
    /// outside `0..=255` land outside [0, 1] and are scored as given.
    pub fn from_integer<T>(data: Array4<T>) -> Self
    where
        T: Copy + Into<f64>,
    {
        Self {
            data: data.mapv(|v| (v.into() / 255.0) as f32),
        }
    }

    pub fn from_u8(data: Array4<u8>) -> Self {
        Self::from_integer(data)
    }

    pub fn from_i16(data: Array4<i16>) -> Self {
        Self::from_integer(data)
    }

    pub fn from_i32(data: Array4<i32>) -> Self {
        Self::from_integer(data)
    }

    /// Stack individual `(H, W, C)` frames.
    ///
    /// Fails with `InvalidInput { field: "images" }` when frames disagree
    /// on shape.
    pub fn from_frames(frames: &[Array3<f32>]) -> BlendResult<Self> {
        let Some(first) = frames.first() else {
            return Ok(Self {
                data: Array4::zeros((0, 0, 0, 3)),
            });
        };
        let shape = first.dim();
        if let Some((i, bad)) = frames.iter().enumerate().find(|(_, f)| f.dim() != shape) {
            return Err(BlendError::invalid_input(
                "images",
                format!("frame {i} has shape {:?}, expected {:?}", bad.dim(), shape),
            ));
        }
        let views: Vec<ArrayView3<f32>> = frames.iter().map(|f| f.view()).collect();
        let data = ndarray::stack(Axis(0), &views)
            .map_err(|e| BlendError::invalid_input("images", e.to_string()))?;
        Ok(Self { data })
    }

    /// Build from a flat row-major buffer and an `(N, H, W, C)` shape.
    pub fn from_raw(shape: [usize; 4], pixels: Vec<f32>) -> BlendResult<Self> {
        let expected: usize = shape.iter().product();
        if pixels.len() != expected {
            return Err(BlendError::invalid_input(
                "images",
                format!(
                    "buffer holds {} values, shape {:?} needs {expected}",
                    pixels.len(),
                    shape
                ),
            ));
        }
        let data = Array4::from_shape_vec((shape[0], shape[1], shape[2], shape[3]), pixels)
            .map_err(|e| BlendError::invalid_input("images", e.to_string()))?;
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(height, width)` shared by every frame.
    pub fn frame_size(&self) -> (usize, usize) {
        let (_, h, w, _) = self.data.dim();
        (h, w)
    }

    pub fn channels(&self) -> usize {
        self.data.len_of(Axis(3))
    }

    pub fn frame(&self, index: usize) -> ArrayView3<'_, f32> {
        self.data.index_axis(Axis(0), index)
    }

    /// Reject tensors the analyzer cannot score.
    pub fn check_analyzable(&self) -> BlendResult<()> {
        let (h, w) = self.frame_size();
        if self.channels() < 3 {
            return Err(BlendError::Analysis(format!(
                "expected at least 3 channels, got {}",
                self.channels()
            )));
        }
        if !self.is_empty() && (h == 0 || w == 0) {
            return Err(BlendError::Analysis(format!(
                "degenerate frame size {w}x{h}"
            )));
        }
        Ok(())
    }
}

/// Luma plane `0.299R + 0.587G + 0.114B` of one `(H, W, C)` frame.
///
/// Channels beyond the third (alpha) are ignored.
pub fn luma(frame: ArrayView3<'_, f32>) -> Array2<f32> {
    let (h, w, _) = frame.dim();
    let mut out = Array2::<f32>::zeros((h, w));
    let [kr, kg, kb] = LUMA_WEIGHTS;
    Zip::from(&mut out)
        .and(frame.index_axis(Axis(2), 0))
        .and(frame.index_axis(Axis(2), 1))
        .and(frame.index_axis(Axis(2), 2))
        .for_each(|y, &r, &g, &b| *y = kr * r + kg * g + kb * b);
    out
}
