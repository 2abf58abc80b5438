//! The DSP front end: sample decoding, channelization, and demodulation
//! (C1 through C5 of the design).

pub mod channel;
pub mod demod;
pub mod fir;

use num_complex::Complex;

/// Nominal source sample rate (Hz): interleaved I/Q at the RTL-SDR
/// convention, centered on 162.000 MHz.
pub const SOURCE_RATE: usize = 300_000;

/// Rate after the ÷3 decimator.
pub const STAGE2_RATE: usize = SOURCE_RATE / 3;

/// Rate after the per-channel ÷2 decimator; the rate at which HDLC framing
/// operates.
pub const CHANNEL_RATE: usize = STAGE2_RATE / 2;

/// Trailing output samples suppressed by the ÷3 decimator for want of
/// look-ahead (§4.2).
pub const DECIMATE3_TAIL: usize = 10;

/// Trailing output samples suppressed by the ÷2 decimator (§4.4).
pub const DECIMATE2_TAIL: usize = 15;

/// Sample decoder (C1): converts interleaved unsigned 8-bit I/Q bytes
/// (zero at 128) into a signed complex baseband stream.
pub fn decode_samples(raw: &[u8]) -> Vec<Complex<i64>> {
    raw.chunks_exact(2)
        .map(|pair| {
            Complex::new(pair[0] as i64 - 128, pair[1] as i64 - 128)
        })
        .collect()
}

/// The two demodulated channels produced by one sweep of C1 through C5,
/// each as a (frequency, power) pair of streams.
pub struct DemodulatedChannels {
    pub ais1: (Vec<i64>, Vec<i64>),
    pub ais2: (Vec<i64>, Vec<i64>),
}

/// Runs C1 -> C2 -> C3 -> C4 -> C5 over one raw sample buffer, producing
/// the demodulated frequency/power streams for both AIS channels.
pub fn channelize(raw: &[u8], h3: &fir::Kernel, h8: &fir::Kernel) -> DemodulatedChannels {
    let baseband = decode_samples(raw);
    let stage2 = fir::decimate(h3, &baseband, 3, DECIMATE3_TAIL);
    let (ais1_100k, ais2_100k) = channel::split(&stage2);
    let ais1_50k = fir::decimate(h8, &ais1_100k, 2, DECIMATE2_TAIL);
    let ais2_50k = fir::decimate(h8, &ais2_100k, 2, DECIMATE2_TAIL);

    DemodulatedChannels {
        ais1: demod::demodulate(&ais1_50k),
        ais2: demod::demodulate(&ais2_50k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_samples_is_bias_removed() {
        let raw = [128u8, 128, 0, 255, 1, 200];
        let out = decode_samples(&raw);
        assert_eq!(
            out,
            vec![
                Complex::new(0, 0),
                Complex::new(-128, 127),
                Complex::new(-127, 72)
            ]
        );
    }

    #[test]
    fn constant_zero_input_yields_zero_power_channels() {
        let raw = vec![128u8; 2 * SOURCE_RATE];
        let h3 = fir::Kernel::h3();
        let h8 = fir::Kernel::h8();
        let channels = channelize(&raw, &h3, &h8);
        assert!(channels.ais1.1.iter().all(|&p| p == 0));
        assert!(channels.ais2.1.iter().all(|&p| p == 0));
    }
}
