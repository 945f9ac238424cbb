//! NSF and NSFe header/container parsing.
//!
//! NSF is a flat 0x80-byte header followed by raw PRG data. NSFe wraps the
//! same information (plus optional per-track metadata) in a chunked
//! container: `u32` little-endian length, 4-byte chunk id, payload, repeated
//! until a `NEND` chunk.

#[cfg(not(feature = "std"))]
use alloc::{string::String, string::ToString, vec::Vec};

/// Size in bytes of the fixed NSF header.
pub const NSF_HEADER_SIZE: usize = 0x80;

/// Number of bank-switch slots ($5FF8-$5FFF), each covering 4KB of PRG.
pub const BANK_SLOTS: usize = 8;

/// Bank granularity in bytes.
pub const BANK_SIZE: usize = 0x1000;

/// Errors that can occur when parsing NSF or NSFe files.
#[derive(Debug, thiserror::Error)]
pub enum NsfError {
    /// File is smaller than the fixed NSF header.
    #[error("NSF file too small: expected at least {NSF_HEADER_SIZE} bytes, got {0}")]
    FileTooSmall(usize),

    /// Header magic didn't match `"NESM\x1A"` or `"NSFE"`.
    #[error("invalid NSF/NSFe magic: {0:02X?}")]
    InvalidMagic([u8; 4]),

    /// Header declares an expansion sound chip; none are currently emulated.
    #[error("unsupported expansion chip byte: {0:#04x}")]
    UnsupportedExpansionChip(u8),

    /// Load address is outside the PRG window ($8000-$FFFF).
    #[error("load address {0:#06x} is below $8000")]
    LoadAddressOutOfRange(u16),

    /// An NSFe chunk's declared length runs past the end of the file.
    #[error("NSFe chunk {0:?} too short: declared {1} bytes, {2} available")]
    ChunkTooShort(String, usize, usize),

    /// A required NSFe chunk (`INFO` or `DATA`) is missing.
    #[error("NSFe file missing required chunk {0:?}")]
    ChunkMissing(&'static str),

    /// An unknown NSFe chunk with an uppercase leading byte (mandatory to
    /// understand) was encountered.
    #[error("unknown required NSFe chunk {0:?}")]
    RequiredChunkUnknown(String),
}

/// Which container this tune was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NsfFormat {
    /// Flat 0x80-byte NSF header.
    Nsf,
    /// Chunked NSFe container.
    Nsfe,
}

/// Region a tune targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NsfRegion {
    /// NTSC timing only.
    Ntsc,
    /// PAL timing only.
    Pal,
    /// Plays correctly under either timing.
    Dual,
}

/// Parsed NSF/NSFe metadata plus the raw PRG image.
#[derive(Debug, Clone)]
pub struct NsfModule {
    /// Container this was parsed from.
    pub format: NsfFormat,
    /// Total number of songs in the tune set.
    pub total_songs: u8,
    /// 1-indexed song selected by default on load.
    pub starting_song: u8,
    /// Address the PRG image is loaded at.
    pub load_addr: u16,
    /// Address called once per song, before the first `play` call.
    pub init_addr: u16,
    /// Address called once per frame after init.
    pub play_addr: u16,
    /// Song title, if present.
    pub song_name: String,
    /// Artist name, if present.
    pub artist: String,
    /// Copyright string, if present.
    pub copyright: String,
    /// Play speed in microseconds under NTSC timing.
    pub ntsc_speed: u16,
    /// Play speed in microseconds under PAL timing.
    pub pal_speed: u16,
    /// Region(s) this tune supports.
    pub region: NsfRegion,
    /// Initial bank pointers for `$5FF8-$5FFF`, if bank-switching is used.
    pub bank_init: Option<[u8; BANK_SLOTS]>,
    /// Raw PRG image, starting at `load_addr`.
    pub prg: Vec<u8>,
    /// Per-track duration in milliseconds, indexed 0-based (NSFe `time` chunk).
    pub track_times_ms: Vec<i32>,
    /// Per-track fadeout duration in milliseconds (NSFe `fade` chunk).
    pub track_fades_ms: Vec<i32>,
    /// Per-track display names (NSFe `tlbl` chunk).
    pub track_labels: Vec<String>,
}

impl NsfModule {
    /// Default per-track playback duration when no `time` chunk is given.
    pub const DEFAULT_TRACK_DURATION_MS: i32 = 180_000;

    /// Whether this tune switches PRG banks through `$5FF8-$5FFF`.
    #[must_use]
    pub fn uses_bank_switching(&self) -> bool {
        self.bank_init.is_some()
    }

    /// Parse an NSF or NSFe file from raw bytes, dispatching on magic.
    ///
    /// # Errors
    ///
    /// Returns [`NsfError`] if the magic is unrecognized or the container is
    /// malformed; see the individual parsers for specifics.
    pub fn parse(data: &[u8]) -> Result<Self, NsfError> {
        if data.len() < 4 {
            return Err(NsfError::FileTooSmall(data.len()));
        }

        if &data[0..4] == b"NSFE" {
            parse_nsfe(data)
        } else {
            parse_nsf(data)
        }
    }
}

fn read_fixed_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim().to_string()
}

fn parse_nsf(data: &[u8]) -> Result<NsfModule, NsfError> {
    if data.len() < NSF_HEADER_SIZE {
        return Err(NsfError::FileTooSmall(data.len()));
    }

    let magic = [data[0], data[1], data[2], data[3]];
    if magic != *b"NESM" || data[4] != 0x1A {
        return Err(NsfError::InvalidMagic(magic));
    }

    let version = data[5];
    let total_songs = data[6];
    let starting_song = data[7].max(1);
    let load_addr = u16::from_le_bytes([data[8], data[9]]);
    let init_addr = u16::from_le_bytes([data[10], data[11]]);
    let play_addr = u16::from_le_bytes([data[12], data[13]]);

    if load_addr < 0x8000 {
        return Err(NsfError::LoadAddressOutOfRange(load_addr));
    }

    let song_name = read_fixed_string(&data[14..46]);
    let artist = read_fixed_string(&data[46..78]);
    let copyright = read_fixed_string(&data[78..110]);

    let ntsc_speed = u16::from_le_bytes([data[0x6E], data[0x6F]]);
    let bank_raw: [u8; BANK_SLOTS] = data[0x70..0x78].try_into().unwrap();
    let uses_banking = bank_raw.iter().any(|&b| b != 0);
    let pal_speed = u16::from_le_bytes([data[0x78], data[0x79]]);

    let region_byte = data[0x7A];
    let region = match region_byte & 0x03 {
        0 => NsfRegion::Ntsc,
        1 => NsfRegion::Pal,
        _ => NsfRegion::Dual,
    };

    let expansion = data[0x7B];
    if expansion != 0 {
        return Err(NsfError::UnsupportedExpansionChip(expansion));
    }

    let _ = version; // NES 2.0-style length at 0x7D-0x7F isn't needed beyond header size.

    let prg = data[NSF_HEADER_SIZE..].to_vec();

    Ok(NsfModule {
        format: NsfFormat::Nsf,
        total_songs,
        starting_song,
        load_addr,
        init_addr,
        play_addr,
        song_name,
        artist,
        copyright,
        ntsc_speed,
        pal_speed,
        region,
        bank_init: uses_banking.then_some(bank_raw),
        prg,
        track_times_ms: Vec::new(),
        track_fades_ms: Vec::new(),
        track_labels: Vec::new(),
    })
}

struct Chunk<'a> {
    id: [u8; 4],
    payload: &'a [u8],
}

fn iter_chunks(data: &[u8]) -> Result<Vec<Chunk<'_>>, NsfError> {
    let mut chunks = Vec::new();
    let mut pos = 4; // past "NSFE"

    loop {
        if pos + 8 > data.len() {
            return Err(NsfError::ChunkTooShort("<header>".to_string(), 8, data.len() - pos));
        }

        let len = u32::from_le_bytes(data[pos..pos + 4].try_into().unwrap()) as usize;
        let id: [u8; 4] = data[pos + 4..pos + 8].try_into().unwrap();
        pos += 8;

        if &id == b"NEND" {
            break;
        }

        if pos + len > data.len() {
            return Err(NsfError::ChunkTooShort(
                String::from_utf8_lossy(&id).to_string(),
                len,
                data.len().saturating_sub(pos),
            ));
        }

        chunks.push(Chunk {
            id,
            payload: &data[pos..pos + len],
        });
        pos += len;
    }

    Ok(chunks)
}

fn parse_nsfe(data: &[u8]) -> Result<NsfModule, NsfError> {
    let chunks = iter_chunks(data)?;

    let info = chunks
        .iter()
        .find(|c| &c.id == b"INFO")
        .ok_or(NsfError::ChunkMissing("INFO"))?;
    if info.payload.len() < 14 {
        return Err(NsfError::ChunkTooShort(
            "INFO".to_string(),
            14,
            info.payload.len(),
        ));
    }

    let load_addr = u16::from_le_bytes([info.payload[0], info.payload[1]]);
    let init_addr = u16::from_le_bytes([info.payload[2], info.payload[3]]);
    let play_addr = u16::from_le_bytes([info.payload[4], info.payload[5]]);
    let region_byte = info.payload[6];
    let total_songs = info.payload[7].max(1);
    let starting_song = info.payload[8].max(1);
    let ntsc_speed = u16::from_le_bytes([info.payload[10], info.payload[11]]);
    let pal_speed = u16::from_le_bytes([info.payload[12], info.payload[13]]);

    if load_addr < 0x8000 {
        return Err(NsfError::LoadAddressOutOfRange(load_addr));
    }

    let region = match region_byte & 0x03 {
        0 => NsfRegion::Ntsc,
        1 => NsfRegion::Pal,
        _ => NsfRegion::Dual,
    };

    let data_chunk = chunks
        .iter()
        .find(|c| &c.id == b"DATA")
        .ok_or(NsfError::ChunkMissing("DATA"))?;
    let prg = data_chunk.payload.to_vec();

    let bank_init = chunks
        .iter()
        .find(|c| &c.id == b"BANK")
        .map(|c| {
            let mut banks = [0u8; BANK_SLOTS];
            let n = c.payload.len().min(BANK_SLOTS);
            banks[..n].copy_from_slice(&c.payload[..n]);
            banks
        });

    let mut song_name = String::new();
    let mut artist = String::new();
    let mut copyright = String::new();
    if let Some(auth) = chunks.iter().find(|c| &c.id == b"auth") {
        let fields: Vec<&[u8]> = auth.payload.split(|&b| b == 0).collect();
        song_name = fields.first().map(|f| read_fixed_string(f)).unwrap_or_default();
        artist = fields.get(1).map(|f| read_fixed_string(f)).unwrap_or_default();
        copyright = fields.get(2).map(|f| read_fixed_string(f)).unwrap_or_default();
    }

    let track_times_ms = chunks
        .iter()
        .find(|c| &c.id == b"time")
        .map(|c| {
            c.payload
                .chunks_exact(4)
                .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect()
        })
        .unwrap_or_default();

    let track_fades_ms = chunks
        .iter()
        .find(|c| &c.id == b"fade")
        .map(|c| {
            c.payload
                .chunks_exact(4)
                .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect()
        })
        .unwrap_or_default();

    let track_labels = chunks
        .iter()
        .find(|c| &c.id == b"tlbl")
        .map(|c| {
            c.payload
                .split(|&b| b == 0)
                .filter(|f| !f.is_empty())
                .map(read_fixed_string)
                .collect()
        })
        .unwrap_or_default();

    for chunk in &chunks {
        let known = matches!(
            &chunk.id,
            b"INFO" | b"DATA" | b"BANK" | b"RATE" | b"auth" | b"time" | b"fade" | b"tlbl" | b"text"
        );
        if !known && chunk.id[0].is_ascii_uppercase() {
            return Err(NsfError::RequiredChunkUnknown(
                String::from_utf8_lossy(&chunk.id).to_string(),
            ));
        }
    }

    Ok(NsfModule {
        format: NsfFormat::Nsfe,
        total_songs,
        starting_song,
        load_addr,
        init_addr,
        play_addr,
        song_name,
        artist,
        copyright,
        ntsc_speed,
        pal_speed,
        region,
        bank_init,
        prg,
        track_times_ms,
        track_fades_ms,
        track_labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_nsf(load_addr: u16, init_addr: u16, play_addr: u16, prg: &[u8]) -> Vec<u8> {
        let mut header = vec![0u8; NSF_HEADER_SIZE];
        header[0..5].copy_from_slice(b"NESM\x1A");
        header[5] = 1;
        header[6] = 4;
        header[7] = 1;
        header[8..10].copy_from_slice(&load_addr.to_le_bytes());
        header[10..12].copy_from_slice(&init_addr.to_le_bytes());
        header[12..14].copy_from_slice(&play_addr.to_le_bytes());
        header[0x6E..0x70].copy_from_slice(&16639u16.to_le_bytes());
        let mut bytes = header;
        bytes.extend_from_slice(prg);
        bytes
    }

    #[test]
    fn parses_flat_nsf_header() {
        let bytes = build_nsf(0x8000, 0x8010, 0x8020, &[0xEA; 16]);
        let module = NsfModule::parse(&bytes).unwrap();

        assert_eq!(module.format, NsfFormat::Nsf);
        assert_eq!(module.load_addr, 0x8000);
        assert_eq!(module.init_addr, 0x8010);
        assert_eq!(module.play_addr, 0x8020);
        assert_eq!(module.total_songs, 4);
        assert_eq!(module.starting_song, 1);
        assert!(!module.uses_bank_switching());
        assert_eq!(module.prg.len(), 16);
    }

    #[test]
    fn rejects_short_files() {
        let err = NsfModule::parse(&[0x4E, 0x45]).unwrap_err();
        assert!(matches!(err, NsfError::FileTooSmall(2)));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = build_nsf(0x8000, 0x8010, 0x8020, &[]);
        bytes[0] = b'X';
        let err = NsfModule::parse(&bytes).unwrap_err();
        assert!(matches!(err, NsfError::InvalidMagic(_)));
    }

    #[test]
    fn rejects_expansion_chip() {
        let mut bytes = build_nsf(0x8000, 0x8010, 0x8020, &[]);
        bytes[0x7B] = 0x01;
        let err = NsfModule::parse(&bytes).unwrap_err();
        assert!(matches!(err, NsfError::UnsupportedExpansionChip(0x01)));
    }

    #[test]
    fn rejects_load_address_below_8000() {
        let bytes = build_nsf(0x6000, 0x8010, 0x8020, &[]);
        let err = NsfModule::parse(&bytes).unwrap_err();
        assert!(matches!(err, NsfError::LoadAddressOutOfRange(0x6000)));
    }

    #[test]
    fn detects_bank_switching() {
        let mut bytes = build_nsf(0x8000, 0x8010, 0x8020, &[0u8; 4096 * 8]);
        bytes[0x70] = 1;
        let module = NsfModule::parse(&bytes).unwrap();
        assert!(module.uses_bank_switching());
        assert_eq!(module.bank_init.unwrap()[0], 1);
    }

    fn chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = (payload.len() as u32).to_le_bytes().to_vec();
        out.extend_from_slice(id);
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn parses_nsfe_container() {
        let mut info = vec![0u8; 14];
        info[0..2].copy_from_slice(&0x8000u16.to_le_bytes());
        info[2..4].copy_from_slice(&0x8010u16.to_le_bytes());
        info[4..6].copy_from_slice(&0x8020u16.to_le_bytes());
        info[7] = 2;
        info[8] = 1;

        let mut bytes = b"NSFE".to_vec();
        bytes.extend(chunk(b"INFO", &info));
        bytes.extend(chunk(b"DATA", &[0xEA; 8]));
        bytes.extend(chunk(b"NEND", &[]));

        let module = NsfModule::parse(&bytes).unwrap();
        assert_eq!(module.format, NsfFormat::Nsfe);
        assert_eq!(module.total_songs, 2);
        assert_eq!(module.prg, vec![0xEA; 8]);
    }

    #[test]
    fn nsfe_missing_data_chunk_is_fatal() {
        let mut info = vec![0u8; 14];
        info[7] = 1;
        info[8] = 1;

        let mut bytes = b"NSFE".to_vec();
        bytes.extend(chunk(b"INFO", &info));
        bytes.extend(chunk(b"NEND", &[]));

        let err = NsfModule::parse(&bytes).unwrap_err();
        assert!(matches!(err, NsfError::ChunkMissing("DATA")));
    }

    #[test]
    fn nsfe_unknown_required_chunk_is_fatal() {
        let mut info = vec![0u8; 14];
        info[7] = 1;
        info[8] = 1;

        let mut bytes = b"NSFE".to_vec();
        bytes.extend(chunk(b"INFO", &info));
        bytes.extend(chunk(b"DATA", &[0xEA]));
        bytes.extend(chunk(b"FOOZ", &[1, 2, 3]));
        bytes.extend(chunk(b"NEND", &[]));

        let err = NsfModule::parse(&bytes).unwrap_err();
        assert!(matches!(err, NsfError::RequiredChunkUnknown(_)));
    }

    #[test]
    fn nsfe_unknown_lowercase_chunk_is_ignored() {
        let mut info = vec![0u8; 14];
        info[7] = 1;
        info[8] = 1;

        let mut bytes = b"NSFE".to_vec();
        bytes.extend(chunk(b"INFO", &info));
        bytes.extend(chunk(b"DATA", &[0xEA]));
        bytes.extend(chunk(b"fooz", &[1, 2, 3]));
        bytes.extend(chunk(b"NEND", &[]));

        let module = NsfModule::parse(&bytes).unwrap();
        assert_eq!(module.prg, vec![0xEA]);
    }
}
