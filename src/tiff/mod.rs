use std::collections::HashSet;
use std::fmt::Display;
use std::io::{self, Read, Seek};
use tracing::debug;

mod endian;
mod error;
mod ifd;
mod tag;

pub use endian::Endian;
pub use error::TiffError;
pub use ifd::Ifd;
pub use tag::{Tag, TagId, TagType};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TiffVariant {
    Normal,
    Big,
}

impl TiffVariant {
    fn read_offset<R: Read>(&self, endian: Endian, stream: &mut R) -> io::Result<u64> {
        match self {
            TiffVariant::Normal => endian.read::<4, u32>(stream).map(|v| v as u64),
            TiffVariant::Big => endian.read(stream),
        }
    }

    const fn offset_bytesize(&self) -> usize {
        match self {
            TiffVariant::Normal => 4,
            TiffVariant::Big => 8,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tiff {
    pub endian: Endian,
    pub variant: TiffVariant,
    pub ifds: Vec<Ifd>,
}

impl Tiff {
    pub fn open<R: Read + Seek>(stream: &mut R) -> Result<Self, TiffError> {
        // TIFF Header
        let mut buf = [0; 4];
        stream.read_exact(&mut buf)?;

        let endian = match &buf[..2] {
            b"II" => Endian::Little,
            b"MM" => Endian::Big,
            _ => return Err(TiffError::BadMagicBytes(buf)),
        };

        let variant = match endian.decode::<2, u16>([buf[2], buf[3]])? {
            42 => TiffVariant::Normal,
            43 => TiffVariant::Big,
            _ => return Err(TiffError::BadMagicBytes(buf)),
        };

        if TiffVariant::Big == variant {
            // BigTIFFs have 4 extra bytes in the header
            let offset_bytesize: u16 = endian.read(stream)?;
            let _: u16 = endian.read(stream)?; // 0x0000
            if offset_bytesize != 8 {
                return Err(TiffError::BadOffsetSize(offset_bytesize));
            }
        }

        // IFDs
        let mut ifds = vec![];
        let mut visited = HashSet::new();
        let mut ifd_offset = variant.read_offset(endian, stream)?;
        while ifd_offset != 0 {
            if !visited.insert(ifd_offset) {
                return Err(TiffError::IfdLoop(ifd_offset));
            }
            let (ifd, next_offset) = Ifd::parse(stream, ifd_offset, endian, variant)?;
            ifd_offset = next_offset;
            ifds.push(ifd);
        }
        debug!("Parsed {variant:?} TIFF ({endian:?}) with {} IFDs", ifds.len());

        Ok(Self {
            endian,
            variant,
            ifds,
        })
    }

    pub fn ifd0(&self) -> Option<&Ifd> {
        self.ifds.first()
    }
}

#[cfg(feature = "async")]
use {
    std::io::{Cursor, ErrorKind},
    tokio::io::{AsyncRead, AsyncReadExt},
};

#[cfg(feature = "async")]
const INITIAL_FETCH_SIZE: usize = 4096;

#[cfg(feature = "async")]
impl Tiff {
    /// Buffers `source` until the header and IFD chain parse, doubling the
    /// fetch size each round. Stops at end of stream.
    pub async fn open_async<R: AsyncRead + Unpin>(source: &mut R) -> Result<Self, TiffError> {
        let mut fetch_size = INITIAL_FETCH_SIZE;
        let mut buffer = Vec::with_capacity(fetch_size);
        loop {
            let start = buffer.len();
            buffer.resize(start + fetch_size, 0);
            let n = source.read(&mut buffer[start..]).await?;
            buffer.truncate(start + n);

            let result = Self::open(&mut Cursor::new(&buffer));
            match &result {
                Err(TiffError::ReadError(e)) if e.kind() == ErrorKind::UnexpectedEof && n > 0 => {
                    debug!("Buffered {} bytes, TIFF incomplete", buffer.len());
                    fetch_size = fetch_size.saturating_mul(2);
                }
                _ => return result,
            }
        }
    }
}

impl Display for Tiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, ifd) in self.ifds.iter().enumerate() {
            writeln!(f, "IFD {i}:")?;
            for tag in ifd.tags() {
                writeln!(f, "\t{}", tag)?;
            }
        }
        Ok(())
    }
}
