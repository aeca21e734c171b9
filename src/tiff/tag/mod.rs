// refs
// https://www.itu.int/itudoc/itu-t/com16/tiff-fx/docs/tiff6.pdf
// https://www.awaresystems.be/imaging/tiff/bigtiff.html

use super::Endian;
use num_enum::{FromPrimitive, IntoPrimitive};
use num_traits::NumCast;
use std::fmt::Display;

mod id;

pub use id::TagId;

const DISPLAY_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    pub code: u16,
    pub datatype: TagType,
    pub count: usize,
    pub data: Vec<u8>,
    pub endian: Endian,
}

impl Tag {
    pub fn id(&self) -> Option<TagId> {
        TagId::try_from(self.code).ok()
    }

    /// Numeric values of the tag, cast to `T`. Rationals are divided out.
    pub fn values<T: NumCast>(&self) -> Option<Vec<T>> {
        let endian = self.endian;
        let data = &self.data[..];
        match self.datatype {
            TagType::Byte | TagType::Undefined => {
                endian.decode_all_to_primative::<1, u8, T>(data)
            }
            TagType::SByte => endian.decode_all_to_primative::<1, i8, T>(data),
            TagType::Short => endian.decode_all_to_primative::<2, u16, T>(data),
            TagType::SShort => endian.decode_all_to_primative::<2, i16, T>(data),
            TagType::Long | TagType::Ifd => endian.decode_all_to_primative::<4, u32, T>(data),
            TagType::SLong => endian.decode_all_to_primative::<4, i32, T>(data),
            TagType::Float => endian.decode_all_to_primative::<4, f32, T>(data),
            TagType::Double => endian.decode_all_to_primative::<8, f64, T>(data),
            TagType::Long8 | TagType::Ifd8 => endian.decode_all_to_primative::<8, u64, T>(data),
            TagType::SLong8 => endian.decode_all_to_primative::<8, i64, T>(data),
            TagType::Rational => endian
                .decode_all::<4, u32>(data)?
                .chunks_exact(2)
                .map(|pair| T::from(pair[0] as f64 / pair[1] as f64))
                .collect(),
            TagType::SRational => endian
                .decode_all::<4, i32>(data)?
                .chunks_exact(2)
                .map(|pair| T::from(pair[0] as f64 / pair[1] as f64))
                .collect(),
            TagType::Ascii | TagType::Unknown => None,
        }
    }

    pub fn try_to_string(&self) -> Option<String> {
        match self.datatype {
            TagType::Ascii => String::from_utf8(self.data.clone()).ok(),
            _ => None,
        }
    }

    fn value_string(&self) -> String {
        if let Some(s) = self.try_to_string() {
            return s.trim_end_matches('\0').replace('\n', "\\n");
        }
        match self.values::<f64>() {
            Some(values) if values.len() == 1 => format!("{}", values[0]),
            Some(values) => format!("{values:?}"),
            None => "Undefined".to_string(),
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut value_string = self.value_string();
        if value_string.chars().count() > DISPLAY_LIMIT {
            value_string = format!(
                "{}...",
                value_string.chars().take(DISPLAY_LIMIT - 2).collect::<String>()
            );
        }
        let id_string = match self.id() {
            Some(id) => format!("{id:?}"),
            None => format!("Unknown({})", self.code),
        };
        write!(
            f,
            "{} {:?}[{}]: {}",
            id_string, self.datatype, self.count, value_string
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, IntoPrimitive, FromPrimitive)]
#[repr(u16)]
pub enum TagType {
    Byte = 1,
    Ascii = 2,
    Short = 3,
    Long = 4,
    Rational = 5,
    SByte = 6,
    Undefined = 7,
    SShort = 8,
    SLong = 9,
    SRational = 10,
    Float = 11,
    Double = 12,
    Ifd = 13,
    Long8 = 16,
    SLong8 = 17,
    Ifd8 = 18,

    #[num_enum(default)]
    Unknown = 0xFFFF,
}

impl TagType {
    pub fn size_in_bytes(&self) -> usize {
        match self {
            TagType::Byte => 1,
            TagType::Ascii => 1,
            TagType::Short => 2,
            TagType::Long => 4,
            TagType::Rational => 8,
            TagType::SByte => 1,
            TagType::Undefined => 1,
            TagType::SShort => 2,
            TagType::SLong => 4,
            TagType::SRational => 8,
            TagType::Float => 4,
            TagType::Double => 8,
            TagType::Ifd => 4,
            TagType::Long8 => 8,
            TagType::SLong8 => 8,
            TagType::Ifd8 => 8,

            TagType::Unknown => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(code: u16, datatype: TagType, count: usize, data: Vec<u8>) -> Tag {
        Tag {
            code,
            datatype,
            count,
            data,
            endian: Endian::Little,
        }
    }

    #[test]
    fn display_names_known_tags() {
        let width = tag(256, TagType::Short, 1, Endian::Little.encode_all(&[512u16]));
        assert_eq!(format!("{width}"), "ImageWidth Short[1]: 512");

        let private = tag(50000, TagType::Long, 2, Endian::Little.encode_all(&[1u32, 2]));
        assert_eq!(format!("{private}"), "Unknown(50000) Long[2]: [1.0, 2.0]");
    }

    #[test]
    fn display_truncates_long_values() {
        let ascii = tag(33551, TagType::Ascii, 300, vec![b'a'; 300]);
        let shown = format!("{ascii}");
        assert!(shown.ends_with("..."));
        assert!(shown.len() < 150);
    }

    #[test]
    fn rational_values_are_divided() {
        let data = Endian::Little.encode_all(&[72u32, 1, 1, 4]);
        let resolution = tag(282, TagType::Rational, 2, data);
        assert_eq!(resolution.values::<f64>(), Some(vec![72.0, 0.25]));
    }

    #[test]
    fn ascii_has_no_numeric_values() {
        let ascii = tag(33550, TagType::Ascii, 3, b"ab\0".to_vec());
        assert_eq!(ascii.values::<f64>(), None);
        assert_eq!(ascii.try_to_string().as_deref(), Some("ab\0"));
    }
}
