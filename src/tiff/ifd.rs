use super::{Endian, Tag, TagType, TiffVariant};
use std::io::{self, Read, Seek, SeekFrom};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ifd(pub Vec<Tag>);

impl Ifd {
    pub fn parse<R: Read + Seek>(
        stream: &mut R,
        offset: u64,
        endian: Endian,
        variant: TiffVariant,
    ) -> io::Result<(Ifd, u64)> {
        // IFD starts at offset
        stream.seek(SeekFrom::Start(offset))?;

        // IFD header is just the number of tags
        let tag_count = match variant {
            TiffVariant::Normal => endian.read::<2, u16>(stream)? as u64,
            TiffVariant::Big => endian.read(stream)?,
        };

        // Parse each tag in the IFD
        let mut tags = Vec::with_capacity(tag_count.min(u16::MAX as u64) as usize);
        for _ in 0..tag_count {
            let code = endian.read(stream)?;
            let datatype: TagType = endian.read::<2, u16>(stream)?.into();
            let count = variant.read_offset(endian, stream)? as usize;

            let data_size = count.checked_mul(datatype.size_in_bytes()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("tag {code} count {count} overflows"),
                )
            })?;
            let offset_size = variant.offset_bytesize();

            let data = if data_size > offset_size {
                let data_offset = variant.read_offset(endian, stream)?;
                let pos = stream.stream_position()?;
                stream.seek(SeekFrom::Start(data_offset))?;
                let mut data = Vec::new();
                stream.by_ref().take(data_size as u64).read_to_end(&mut data)?;
                if data.len() != data_size {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("tag {code} data truncated"),
                    ));
                }
                stream.seek(SeekFrom::Start(pos))?;
                data
            } else {
                // Small values live in the offset field itself
                let mut data = vec![0; offset_size];
                stream.read_exact(&mut data)?;
                data.truncate(data_size);
                data
            };

            tags.push(Tag {
                code,
                datatype,
                endian,
                count,
                data,
            });
        }

        let ifd = Ifd(tags);
        let next_ifd_offset = variant.read_offset(endian, stream)?;

        Ok((ifd, next_ifd_offset))
    }

    pub fn tags(&self) -> &[Tag] {
        &self.0
    }

    pub fn get_tag_by_code(&self, code: u16) -> Option<&Tag> {
        let Self(tags) = &self;
        tags.iter().find(|tag| tag.code == code)
    }
}
