//! Channel splitter (C3): derives the AIS2 baseband stream from AIS1 by a
//! ±25 kHz complex rotation, restoring AIS1 to DC with the complementary
//! rotation (§4.3).

use num_complex::Complex;

/// Splits a 100 kHz AIS1-centered complex baseband stream into adjusted
/// AIS1 (re-centered at DC) and AIS2 (the +25 kHz image) streams.
///
/// The four per-sample rotations repeat with period 4 (25 kHz at 100 kHz
/// sample rate is a quarter-cycle per sample).
pub fn split(ais1: &[Complex<i64>]) -> (Vec<Complex<i64>>, Vec<Complex<i64>>) {
    let mut adjusted = Vec::with_capacity(ais1.len());
    let mut ais2 = Vec::with_capacity(ais1.len());

    for (i, s) in ais1.iter().enumerate() {
        let (i1, q1) = (s.re, s.im);
        let (a1, s2) = match i % 4 {
            0 => ((i1, q1), (i1, q1)),
            1 => ((-i1, -q1), (q1, -i1)),
            2 => ((i1, q1), (-i1, -q1)),
            3 => ((-i1, -q1), (-q1, i1)),
            _ => unreachable!(),
        };
        adjusted.push(Complex::new(a1.0, a1.1));
        ais2.push(Complex::new(s2.0, s2.1));
    }

    (adjusted, ais2)
}
