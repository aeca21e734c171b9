//! The narrow view of a parsed TIFF that the GeoTIFF extractors need.
//!
//! Any container parser can back the extractors by implementing these three
//! traits. [`Tiff`], [`Ifd`] and [`Tag`] implement them for this crate's own
//! reader.

use crate::tiff::{Endian, Ifd, Tag, Tiff};

pub trait TiffDocument {
    type Directory: TagDirectory;

    /// Image file directories in file order.
    fn directories(&self) -> &[Self::Directory];
}

pub trait TagDirectory {
    type Field: TagField;

    fn field(&self, code: u16) -> Option<&Self::Field>;

    fn has_field(&self, code: u16) -> bool {
        self.field(code).is_some()
    }
}

pub trait TagField {
    /// Declared number of elements, not bytes.
    fn count(&self) -> usize;
    fn bytes(&self) -> &[u8];
    fn endian(&self) -> Endian;
}

impl TiffDocument for Tiff {
    type Directory = Ifd;

    fn directories(&self) -> &[Ifd] {
        &self.ifds
    }
}

impl TagDirectory for Ifd {
    type Field = Tag;

    fn field(&self, code: u16) -> Option<&Tag> {
        self.get_tag_by_code(code)
    }
}

impl TagField for Tag {
    fn count(&self) -> usize {
        self.count
    }

    fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn endian(&self) -> Endian {
        self.endian
    }
}
