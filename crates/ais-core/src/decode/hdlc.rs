//! HDLC frame locator (C6) and NRZI decoder / bit destuffer (C7), §4.6–4.7.

/// Samples per GMSK symbol at 9600 Bd.
pub fn samples_per_symbol(sample_rate: usize) -> f64 {
    sample_rate as f64 / 9600.0
}

/// Coarse power gate: this many consecutive samples must exceed
/// `POWER_GATE_COARSE` before a burst is considered a sync candidate.
const COARSE_RUN: usize = 100;
const POWER_GATE_COARSE: i64 = 16;
/// Mid-frame fade gate (§4.7): power below this ends the frame.
const POWER_GATE_FADE: i64 = 4;
/// Minimum trailing samples required to contain even the shortest frame
/// plus CRC (§3 Invariants).
const MIN_TAIL: usize = 500;

/// Preamble (24 alternating bits) + HDLC flag (0x7E), as a 32-symbol
/// {+1, -1} template (0 -> +1, 1 -> -1).
const PREAMBLE_FLAG_BITS: &str = "01010101010101010101010101111110";

fn preamble_template() -> [i8; 32] {
    let mut template = [0i8; 32];
    for (i, c) in PREAMBLE_FLAG_BITS.chars().enumerate() {
        template[i] = if c == '0' { 1 } else { -1 };
    }
    template
}

/// Outcome of one HDLC locator call.
pub enum SyncResult {
    /// Synchronized; `bit_center` is the sample index of the first bit
    /// center of the payload.
    Found { bit_center: usize },
    /// No preamble found in the scanned region; resume scanning at `next`.
    NotFound { next: usize },
    /// Too few samples remain to contain a frame.
    EndOfBuffer { at: usize },
}

/// Scans `power`/`freq` (from `start` onward) for the preamble+flag
/// pattern, per the algorithm in §4.6.
pub fn locate(power: &[i64], freq: &[i64], start: usize, sample_rate: usize) -> SyncResult {
    let t = samples_per_symbol(sample_rate);
    let n = power.len();

    // Step 1: coarse power gate.
    let mut i = start;
    let mut run = 0usize;
    let mut burst_start = None;
    while i < n {
        if power[i] >= POWER_GATE_COARSE {
            run += 1;
            if run >= COARSE_RUN {
                burst_start = Some(i + 1 - COARSE_RUN);
                break;
            }
        } else {
            run = 0;
        }
        i += 1;
    }

    let burst_start = match burst_start {
        Some(b) => b,
        None => return SyncResult::EndOfBuffer { at: n },
    };

    if n.saturating_sub(burst_start) < MIN_TAIL {
        return SyncResult::EndOfBuffer { at: burst_start };
    }

    let template = preamble_template();
    let max_shift = (20.0 * t) as usize;

    // The template spans the 32 preamble+flag symbols; payload extraction
    // must begin right after the last of them, not at the match itself.
    let template_span = (32.0 * t + 0.5) as usize;

    // Step 2: positive-only correlation.
    if let Some(imax) = best_shift(freq, burst_start, max_shift, t, &template, true) {
        return SyncResult::Found {
            bit_center: burst_start + imax + template_span,
        };
    }

    // Step 3: negative-only correlation (opposite polarity).
    if let Some(imax) = best_shift(freq, burst_start, max_shift, t, &template, false) {
        return SyncResult::Found {
            bit_center: burst_start + imax + template_span,
        };
    }

    // Step 4: no synchronization; skip ahead by one maximum-length frame.
    let skip = (220.0 * t) as usize;
    SyncResult::NotFound {
        next: burst_start + skip,
    }
}

/// Scans shifts `k in [0, max_shift)`, scoring only all-agreeing terms of
/// a single polarity (aborting a shift as soon as a disagreeing term is
/// seen), and returns the argmax shift if any score is strictly positive.
fn best_shift(
    freq: &[i64],
    burst_start: usize,
    max_shift: usize,
    t: f64,
    template: &[i8; 32],
    positive: bool,
) -> Option<usize> {
    let mut smax = 0i64;
    let mut imax = None;

    for k in 0..max_shift {
        let mut score = 0i64;
        let mut valid = true;
        for (j, &sym) in template.iter().enumerate() {
            let idx = burst_start + k + (j as f64 * t + 0.5) as usize;
            let Some(&f) = freq.get(idx) else {
                valid = false;
                break;
            };
            let term = sym as i64 * f;
            let term = if positive { term } else { -term };
            if term < 0 {
                valid = false;
                break;
            }
            score += term;
        }
        if valid && score > smax {
            smax = score;
            imax = Some(k);
        }
    }

    imax
}

/// Maximum frame size in bytes (§3 Data model).
pub const MAX_FRAME_BYTES: usize = 256;
/// Message body octets begin at this offset; the leading bytes are a
/// notional, unused header area (§3).
pub const BODY_OFFSET: usize = 4;

/// Sentinel previous-symbol value, distinct from both real symbols (0, 1),
/// so the first decoded bit always compares unequal (§9, §4.7).
const NO_PREVIOUS_SYMBOL: i8 = -1;

/// Outcome of one C7 frame-extraction pass.
pub struct FrameResult {
    /// Octet buffer, `BODY_OFFSET..` holds the message body bits.
    pub frame: Vec<u8>,
    /// Number of payload bits accumulated (before any truncation to a
    /// whole number of octets).
    pub bit_count: usize,
    /// Sample index at which the caller should resume scanning for the
    /// next frame.
    pub resume_at: usize,
}

/// NRZI-decodes and bit-destuffs the payload starting at `bit_center`,
/// stepping by `T = samples_per_symbol(sample_rate)` samples, per §4.7.
pub fn extract_frame(
    power: &[i64],
    freq: &[i64],
    bit_center: usize,
    sample_rate: usize,
) -> FrameResult {
    let t = samples_per_symbol(sample_rate);
    let n = power.len();

    let mut frame = vec![0u8; MAX_FRAME_BYTES];
    let mut bit_count = 0usize;
    let mut ones_run = 0u8;
    let mut prev_symbol = NO_PREVIOUS_SYMBOL;

    let mut step = 0usize;
    let resume_at;

    loop {
        let sample = bit_center + (step as f64 * t) as usize;
        if sample >= n {
            resume_at = n;
            break;
        }
        if power[sample] < POWER_GATE_FADE {
            resume_at = sample;
            break;
        }

        let symbol: i8 = if freq[sample] > 0 { 0 } else { 1 };
        let decoded = if symbol == prev_symbol { 1u8 } else { 0u8 };
        prev_symbol = symbol;

        if ones_run >= 5 && decoded == 0 {
            // Stuff bit: drop it and reset the run.
            ones_run = 0;
        } else {
            let byte_idx = BODY_OFFSET + bit_count / 8;
            if byte_idx < frame.len() {
                // MSB-first within each octet, matching the AIS wire order
                // and avoiding the mirror step the unpacker would otherwise
                // need to undo (§9 Endianness mismatch).
                frame[byte_idx] |= decoded << (7 - bit_count % 8);
            }
            bit_count += 1;

            if decoded == 1 {
                ones_run += 1;
            } else {
                ones_run = 0;
            }
        }

        step += 1;
        if BODY_OFFSET + bit_count / 8 >= MAX_FRAME_BYTES {
            resume_at = sample + 1;
            break;
        }
    }

    FrameResult {
        frame,
        bit_count,
        resume_at,
    }
}
