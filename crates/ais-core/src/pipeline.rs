//! The orchestrator (§4.10, §5): runs the DSP front end and, for each
//! resulting channel, repeatedly locates, extracts, and decodes frames
//! until the resume index exhausts the buffer's usable tail.

use std::io::Write;

use tracing::{debug, trace};

use crate::decode::{self, hdlc};
use crate::dsp::{self, fir};
use crate::error::SourceError;
use crate::sink::TextSink;
use crate::source::SampleSource;

/// Minimum trailing samples below which the locator is not invoked again
/// (§3 Invariants: insufficient tail for even the shortest frame + CRC).
const TAIL_GUARD: usize = 500;

/// Owns the two FIR kernels (computed once) across the life of a run; the
/// abstract state object called for by §9 Global scratch buffers.
pub struct Orchestrator {
    h3: fir::Kernel,
    h8: fir::Kernel,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self {
            h3: fir::Kernel::h3(),
            h8: fir::Kernel::h8(),
        }
    }
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs C1 through C9 over one raw sample buffer, writing every
    /// decoded message to `sink`. AIS1 is processed fully before AIS2
    /// (§5 Ordering guarantees).
    pub fn process_buffer<W: Write>(&self, raw: &[u8], sink: &mut TextSink<W>) -> std::io::Result<()> {
        let channels = dsp::channelize(raw, &self.h3, &self.h8);

        for (freq, power) in [channels.ais1, channels.ais2] {
            scan_channel(&power, &freq, sink)?;
        }
        Ok(())
    }

    /// Runs `source.read_buffer()` in a loop, decoding and emitting
    /// messages to `sink` until the source closes (§6 `run(source, sink)`).
    pub async fn run<S, W>(&self, mut source: S, sink: &mut TextSink<W>) -> Result<(), SourceError>
    where
        S: SampleSource,
        W: Write,
    {
        sink.write_header().map_err(SourceError::Io)?;
        loop {
            match source.read_buffer().await? {
                Some(raw) => {
                    trace!(bytes = raw.len(), "processing sample buffer");
                    self.process_buffer(&raw, sink).map_err(SourceError::Io)?;
                }
                None => {
                    debug!("sample source closed, ending run");
                    return Ok(());
                }
            }
        }
    }
}

/// Loops C6+C7+C8+C9 over one demodulated channel until the resume index
/// would leave fewer than `TAIL_GUARD` samples (§4.10).
fn scan_channel<W: Write>(
    power: &[i64],
    freq: &[i64],
    sink: &mut TextSink<W>,
) -> std::io::Result<()> {
    let n = power.len();
    let sample_rate = dsp::CHANNEL_RATE;
    let mut idx = 0usize;

    while idx + TAIL_GUARD <= n {
        match hdlc::locate(power, freq, idx, sample_rate) {
            hdlc::SyncResult::Found { bit_center } => {
                let result = hdlc::extract_frame(power, freq, bit_center, sample_rate);
                if let Some(msg) = decode::decode_body(&result.frame, result.bit_count) {
                    sink.write_message(&msg)?;
                }
                idx = result.resume_at;
            }
            hdlc::SyncResult::NotFound { next } => idx = next,
            hdlc::SyncResult::EndOfBuffer { .. } => break,
        }
    }
    Ok(())
}
