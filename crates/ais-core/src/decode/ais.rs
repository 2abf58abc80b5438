//! AIS message unpacker (C9), §4.9: message-ID-tagged payload decoding for
//! message types 1/2/3 (Class A position report), 4 (base station report)
//! and 5 (static and voyage-related data), with all other IDs reported as
//! unrecognized.

use deku::ctx::{BitSize, Endian};
use deku::no_std_io::Cursor;
use deku::prelude::*;
use deku::reader::Reader;
use serde::Serialize;

/// One decoded AIS message. `id` carries the real message ID (1-27) even
/// for variants that share a decoding path, so the sink can print it
/// verbatim (§6).
#[derive(Debug, PartialEq, Serialize, Clone)]
#[serde(tag = "kind")]
pub enum AisMessage {
    #[serde(rename = "position_report")]
    PositionReport { id: u8, mmsi: u32, body: PositionReportBody },
    #[serde(rename = "base_station")]
    BaseStation { id: u8, mmsi: u32, body: BaseStationBody },
    #[serde(rename = "static_voyage")]
    StaticVoyage { id: u8, mmsi: u32, body: StaticVoyageBody },
    #[serde(rename = "unknown")]
    Unknown { id: u8, mmsi: u32 },
}

impl AisMessage {
    /// The message ID (1-27), preserved verbatim regardless of variant.
    pub fn id(&self) -> u8 {
        match self {
            Self::PositionReport { id, .. }
            | Self::BaseStation { id, .. }
            | Self::StaticVoyage { id, .. }
            | Self::Unknown { id, .. } => *id,
        }
    }

    /// The MMSI of the reporting station, present on every message.
    pub fn mmsi(&self) -> u32 {
        match self {
            Self::PositionReport { mmsi, .. }
            | Self::BaseStation { mmsi, .. }
            | Self::StaticVoyage { mmsi, .. }
            | Self::Unknown { mmsi, .. } => *mmsi,
        }
    }
}

/// Fields carried by a Class A position report (IDs 1-3).
#[derive(Debug, PartialEq, Serialize, DekuRead, Clone)]
#[deku(endian = "big")]
pub struct PositionReportBody {
    /// Navigational status and rate of turn, not surfaced (§4.9).
    #[deku(bits = "12")]
    #[serde(skip)]
    pub nav_rot: u16,
    #[deku(reader = "read_sog(deku::reader)")]
    pub sog_knots: f64,
    #[deku(bits = "1")]
    #[serde(skip)]
    pub position_accuracy: u8,
    #[deku(reader = "read_lon28(deku::reader)")]
    pub lon: f64,
    #[deku(reader = "read_lat27(deku::reader)")]
    pub lat: f64,
    #[deku(reader = "read_cog(deku::reader)")]
    pub cog_degrees: f64,
    /// True heading, time stamp, maneuver indicator, spare, RAIM: not
    /// surfaced (§4.9).
    #[deku(bits = "40")]
    #[serde(skip)]
    pub tail: u64,
}

/// Fields carried by a base station report (ID 4).
#[derive(Debug, PartialEq, Serialize, DekuRead, Clone)]
#[deku(endian = "big")]
pub struct BaseStationBody {
    #[deku(bits = "14")]
    pub year: u16,
    #[deku(bits = "4")]
    pub month: u8,
    #[deku(bits = "5")]
    pub day: u8,
    #[deku(bits = "5")]
    pub hour: u8,
    #[deku(bits = "6")]
    pub minute: u8,
    #[deku(bits = "6")]
    pub second: u8,
    #[deku(bits = "1")]
    #[serde(skip)]
    pub position_accuracy: u8,
    #[deku(reader = "read_lon28(deku::reader)")]
    pub lon: f64,
    #[deku(reader = "read_lat27(deku::reader)")]
    pub lat: f64,
    /// EPFD type, spare, RAIM: not surfaced (§4.9).
    #[deku(bits = "34")]
    #[serde(skip)]
    pub tail: u64,
}

/// Fields carried by a static and voyage-related data report (ID 5).
#[derive(Debug, PartialEq, Serialize, DekuRead, Clone)]
#[deku(endian = "big")]
pub struct StaticVoyageBody {
    /// AIS version and IMO number, not surfaced (§4.9).
    #[deku(bits = "32")]
    #[serde(skip)]
    pub fill1: u32,
    #[deku(reader = "read_sixbit(deku::reader, 7)")]
    pub call_sign: String,
    #[deku(reader = "read_sixbit(deku::reader, 20)")]
    pub name: String,
    /// Ship type, dimensions, EPFD type, ETA and draught: not surfaced
    /// (§4.9).
    #[deku(bits = "70")]
    #[serde(skip)]
    pub fill2: u128,
    #[deku(reader = "read_sixbit(deku::reader, 20)")]
    pub destination: String,
    #[deku(bits = "2")]
    #[serde(skip)]
    pub spare: u8,
}

/// Unpacks one CRC-verified message body: reads the 6-bit message ID and
/// 2-bit repeat indicator, then the 30-bit MMSI common to every message
/// (§4.9 table), then dispatches on the ID.
pub fn unpack(body: &[u8]) -> Result<AisMessage, DekuError> {
    let mut cursor = Cursor::new(body);
    let mut reader = Reader::new(&mut cursor);

    let id = u8::from_reader_with_ctx(&mut reader, BitSize(6))?;
    let _repeat = u8::from_reader_with_ctx(&mut reader, BitSize(2))?;
    let mmsi = u32::from_reader_with_ctx(&mut reader, (Endian::Big, BitSize(30)))?;

    match id {
        1..=3 => {
            let body = PositionReportBody::from_reader_with_ctx(&mut reader, ())?;
            Ok(AisMessage::PositionReport { id, mmsi, body })
        }
        4 => {
            let body = BaseStationBody::from_reader_with_ctx(&mut reader, ())?;
            Ok(AisMessage::BaseStation { id, mmsi, body })
        }
        5 => {
            let body = StaticVoyageBody::from_reader_with_ctx(&mut reader, ())?;
            Ok(AisMessage::StaticVoyage { id, mmsi, body })
        }
        _ => Ok(AisMessage::Unknown { id, mmsi }),
    }
}

/// Reads a sign-extended 28-bit longitude and scales to degrees (§4.9:
/// divide by 600000), clamped to the valid [-180, +180] range (§8 boundary
/// behaviors: the all-zero-magnitude sign-bit pattern decodes out of range
/// and clamps to -180.0).
fn read_lon28<R: deku::no_std_io::Read + deku::no_std_io::Seek>(
    reader: &mut Reader<R>,
) -> Result<f64, DekuError> {
    let raw = u32::from_reader_with_ctx(reader, (Endian::Big, BitSize(28)))?;
    let signed = sign_extend(raw as i64, 28);
    Ok((signed as f64 / 600_000.0).clamp(-180.0, 180.0))
}

/// Reads a sign-extended 27-bit latitude and scales to degrees, clamped to
/// the valid [-90, +90] range.
fn read_lat27<R: deku::no_std_io::Read + deku::no_std_io::Seek>(
    reader: &mut Reader<R>,
) -> Result<f64, DekuError> {
    let raw = u32::from_reader_with_ctx(reader, (Endian::Big, BitSize(27)))?;
    let signed = sign_extend(raw as i64, 27);
    Ok((signed as f64 / 600_000.0).clamp(-90.0, 90.0))
}

/// Reads the 10-bit speed-over-ground field and scales to knots (tenths).
fn read_sog<R: deku::no_std_io::Read + deku::no_std_io::Seek>(
    reader: &mut Reader<R>,
) -> Result<f64, DekuError> {
    let raw = u16::from_reader_with_ctx(reader, (Endian::Big, BitSize(10)))?;
    Ok(raw as f64 / 10.0)
}

/// Reads the 12-bit course-over-ground field and scales to degrees (tenths).
fn read_cog<R: deku::no_std_io::Read + deku::no_std_io::Seek>(
    reader: &mut Reader<R>,
) -> Result<f64, DekuError> {
    let raw = u16::from_reader_with_ctx(reader, (Endian::Big, BitSize(12)))?;
    Ok(raw as f64 / 10.0)
}

/// Sign-extends the `width`-bit two's complement value `raw` to `i64`.
fn sign_extend(raw: i64, width: u32) -> i64 {
    let shift = 64 - width;
    (raw << shift) >> shift
}

/// Decodes `n` six-bit characters per the ITU 6-bit ASCII alphabet (`v < 32`
/// maps to `ASCII(v + 64)`, otherwise `ASCII(v)`), trimming the trailing
/// `@`/space padding (§4.9).
fn read_sixbit<R: deku::no_std_io::Read + deku::no_std_io::Seek>(
    reader: &mut Reader<R>,
    n: usize,
) -> Result<String, DekuError> {
    let mut s = String::with_capacity(n);
    for _ in 0..n {
        let v = u8::from_reader_with_ctx(reader, (Endian::Big, BitSize(6)))?;
        let c = if v < 32 { v + 64 } else { v };
        s.push(c as char);
    }
    Ok(s.trim_end_matches(['@', ' ']).to_string())
}
