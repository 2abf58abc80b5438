//! Sample source (§6): an external collaborator yielding fixed-size raw
//! I/Q buffers. The core only needs a blocking `read_exact`-style
//! primitive; transport (TCP, file, pipe) is deliberately not the core's
//! concern (§9 Platform-specific socket code).

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::SourceError;

/// `N`, the number of interleaved (I, Q) sample pairs per buffer: roughly
/// one second at the nominal 300 kHz source rate.
pub const NIQ: usize = 300_000;

/// Byte length of one raw sample buffer.
pub const BUFFER_BYTES: usize = 2 * NIQ;

/// Blocking, fixed-size raw sample reader.
pub trait SampleSource {
    /// Reads one `BUFFER_BYTES`-length buffer. Returns `Ok(None)` on a
    /// clean end-of-stream (§7 Source closed).
    fn read_buffer(&mut self) -> impl std::future::Future<Output = Result<Option<Vec<u8>>, SourceError>> + Send;
}

/// A TCP-backed sample source, the RTL-SDR-over-network convention (§6).
pub struct TcpSource {
    stream: TcpStream,
}

impl TcpSource {
    pub async fn connect(addr: &str) -> Result<Self, SourceError> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self { stream })
    }
}

impl SampleSource for TcpSource {
    async fn read_buffer(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        let mut buf = vec![0u8; BUFFER_BYTES];
        match self.stream.read_exact(&mut buf).await {
            Ok(_) => Ok(Some(buf)),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                debug!("sample source closed");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
