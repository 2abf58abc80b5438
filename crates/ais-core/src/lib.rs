//! A VHF AIS receiver core: DSP channelization, HDLC framing and CRC
//! verification, and ITU-R M.1371-5 message unpacking.
#![allow(rustdoc::broken_intra_doc_links)]

pub mod decode;
pub mod dsp;
pub mod error;
pub mod pipeline;
pub mod sink;
pub mod source;

pub mod prelude {
    pub use crate::decode::{ais::AisMessage, crc, hdlc};
    pub use crate::error::SourceError;
    pub use crate::pipeline::Orchestrator;
    pub use crate::sink::TextSink;
    pub use crate::source::{SampleSource, TcpSource};
}
