use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TiffError {
    #[error("bad TIFF magic bytes: {0:02X?}")]
    BadMagicBytes([u8; 4]),
    #[error("unsupported BigTIFF offset size {0}")]
    BadOffsetSize(u16),
    #[error("IFD chain revisits offset {0}")]
    IfdLoop(u64),
    #[error("failed to read TIFF: {0}")]
    ReadError(#[from] io::Error),
}
