//! Reads the GeoTIFF ModelTiepointTag and ModelPixelScaleTag out of a TIFF.
//!
//! The extractors in [`geotags`] work on anything implementing
//! [`TiffDocument`]; [`Tiff`] is the bundled implementation.

use std::io::{BufReader, Read, Seek};

mod error;
pub mod geotags;
pub mod tiff;

pub use error::{GeoTiepointsError, GeoTiepointsResult};
pub use geotags::{
    georeference, georeference_with, pixel_scale, pixel_scale_with, tie_points, tie_points_with,
    GeoReference, GeoTiffError, IfdLookup, PixelScale, TiePoint, TiffDocument,
};
pub use tiff::{Endian, Tiff, TiffError};

/// Parses the TIFF structure of `source` and extracts both GeoTIFF tags.
pub fn read_georeference<R: Read + Seek>(
    source: &mut R,
    lookup: IfdLookup,
) -> GeoTiepointsResult<GeoReference> {
    let stream = &mut BufReader::new(source);
    let tiff = Tiff::open(stream)?;
    Ok(georeference_with(&tiff, lookup)?)
}
