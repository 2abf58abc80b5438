//! FM/AM demodulator (C5): per-sample instantaneous frequency (as a signed
//! proxy for phase difference) and instantaneous power (§4.5).

use num_complex::Complex;

/// Demodulates a complex baseband stream into a frequency stream and a
/// power ("amplitude") stream, both of length `n - 1`.
pub fn demodulate(iq: &[Complex<i64>]) -> (Vec<i64>, Vec<i64>) {
    if iq.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let n = iq.len() - 1;
    let mut freq = Vec::with_capacity(n);
    let mut power = Vec::with_capacity(n);
    for i in 0..n {
        let (i0, q0) = (iq[i].re, iq[i].im);
        let (i1, q1) = (iq[i + 1].re, iq[i + 1].im);
        freq.push(q1 * i0 - q0 * i1);
        power.push(i1 * i1 + q1 * q1);
    }
    (freq, power)
}
