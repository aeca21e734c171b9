use super::{decode_field_f64s, find_field, GeoTiffError, IfdLookup, TagField, TiffDocument};
use crate::tiff::TagId;
use std::fmt::Display;

const SCALE_LEN: usize = 3;

/// Model-space distance covered by one raster step along each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelScale {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Display for PixelScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

pub fn pixel_scale<D: TiffDocument>(doc: &D) -> Result<PixelScale, GeoTiffError> {
    pixel_scale_with(doc, IfdLookup::default())
}

pub fn pixel_scale_with<D: TiffDocument>(
    doc: &D,
    lookup: IfdLookup,
) -> Result<PixelScale, GeoTiffError> {
    let tag = TagId::ModelPixelScale;
    let field = find_field(doc, tag, lookup)?;

    let count = field.count();
    if count != SCALE_LEN {
        return Err(GeoTiffError::InvalidTupleCount { tag, count });
    }

    let values =
        decode_field_f64s(field).map_err(|source| GeoTiffError::Decode { tag, source })?;
    match values[..] {
        [x, y, z] => Ok(PixelScale { x, y, z }),
        _ => Err(GeoTiffError::InvalidTupleCount {
            tag,
            count: values.len(),
        }),
    }
}
