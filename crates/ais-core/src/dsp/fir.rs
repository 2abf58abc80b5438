//! Symmetric low-pass FIR kernels and the convolution used by the two
//! decimation stages (§4.2, §4.4 of the design).
//!
//! Both kernels are windowed-sinc low-pass filters, length 31, quantized to a
//! fixed-point gain of 2^20 and applied with a post-shift of 19 (net gain
//! ~2x). The half-width (taps strictly left or right of the center) is 15.

use num_complex::Complex;

/// Number of one-sided taps (excludes the center tap).
pub const HALF_WIDTH: usize = 15;

const SCALE: f64 = (1u64 << 20) as f64;
const POST_SHIFT: u32 = 19;

/// One-sided kernel coefficients: `taps[0]` is the center tap, `taps[k]`
/// (k >= 1) is applied symmetrically to `x[n-k]` and `x[n+k]`.
#[derive(Debug, Clone)]
pub struct Kernel {
    taps: [i64; HALF_WIDTH + 1],
}

impl Kernel {
    /// Builds a windowed-sinc low-pass kernel with cutoff `cutoff / fs`
    /// (a fraction of the sample rate, not of Nyquist), Hamming-windowed,
    /// quantized to a 2^20 fixed-point scale.
    fn windowed_sinc(cutoff_over_fs: f64) -> Self {
        let mut taps = [0i64; HALF_WIDTH + 1];
        for (k, tap) in taps.iter_mut().enumerate() {
            let ideal = if k == 0 {
                2.0 * cutoff_over_fs
            } else {
                let x = 2.0 * cutoff_over_fs * k as f64;
                2.0 * cutoff_over_fs * (std::f64::consts::PI * x).sin()
                    / (std::f64::consts::PI * x)
            };
            // Hamming window, evaluated at the offset from center in a
            // length-31 window (center index 15 of 0..=30).
            let window = 0.54
                - 0.46
                    * (2.0 * std::f64::consts::PI * (HALF_WIDTH + k) as f64
                        / (2 * HALF_WIDTH) as f64)
                        .cos();
            *tap = (ideal * window * SCALE).round() as i64;
        }
        Kernel { taps }
    }

    /// Anti-alias filter for the ÷3 decimator (stopband ~1/3 of input rate).
    pub fn h3() -> Self {
        Self::windowed_sinc(1.0 / 6.0)
    }

    /// Anti-alias filter for the ÷2 decimator (stopband ~6.25 kHz @ 100 kHz).
    pub fn h8() -> Self {
        Self::windowed_sinc(1.0 / 16.0)
    }

    pub fn center_tap(&self) -> i64 {
        self.taps[0]
    }
}

/// Applies `kernel` to `input`, decimating by `decim`, producing
/// `input.len() / decim - trim_tail` output samples.
///
/// Samples to the left of the buffer (for the first few output indices)
/// are treated as zero: each source buffer is decoded independently and
/// carries no history from the previous one (§3 Lifecycle).
pub fn decimate(
    kernel: &Kernel,
    input: &[Complex<i64>],
    decim: usize,
    trim_tail: usize,
) -> Vec<Complex<i64>> {
    let out_len = input.len() / decim;
    let out_len = out_len.saturating_sub(trim_tail);

    let mut out = Vec::with_capacity(out_len);
    for j in 0..out_len {
        let n = decim * j;
        let mut acc_re: i64 = kernel.taps[0] * input[n].re;
        let mut acc_im: i64 = kernel.taps[0] * input[n].im;
        for i in 1..=HALF_WIDTH {
            let left = if n >= i {
                input[n - i]
            } else {
                Complex::new(0, 0)
            };
            let right = input[n + i];
            let h = kernel.taps[i];
            acc_re += h * (left.re + right.re);
            acc_im += h * (left.im + right.im);
        }
        out.push(Complex::new(acc_re >> POST_SHIFT, acc_im >> POST_SHIFT));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h3_center_tap_matches_design_constant() {
        assert_eq!(Kernel::h3().center_tap(), 349_525);
    }

    #[test]
    fn h8_center_tap_matches_design_constant() {
        assert_eq!(Kernel::h8().center_tap(), 131_072);
    }

    #[test]
    fn decimate_passes_dc_with_near_unity_gain() {
        let kernel = Kernel::h3();
        let input = vec![Complex::new(1000i64, -1000i64); 200];
        let out = decimate(&kernel, &input, 3, 10);
        // Far from the zero-padded left edge, DC should survive almost
        // exactly (kernel sums to ~2^20, post-shift by 19 gives ~2x).
        let sample = out[30];
        assert!((sample.re - 2000).abs() <= 10);
        assert!((sample.im - (-2000)).abs() <= 10);
    }

    #[test]
    fn decimate_produces_expected_length() {
        let kernel = Kernel::h3();
        let input = vec![Complex::new(0i64, 0i64); 300];
        let out = decimate(&kernel, &input, 3, 10);
        assert_eq!(out.len(), 300 / 3 - 10);
    }
}
