// https://docs.ogc.org/is/19-008r4/19-008r4.html#_geotiff_tags_for_coordinate_transformations

use crate::tiff::TagId;
use std::fmt::Display;
use tracing::{debug, warn};

mod decode;
mod document;
mod error;
mod scale;
mod tiepoint;

pub use decode::{decode_f64s, decode_field_f64s, encode_f64s, DecodeError};
pub use document::{TagDirectory, TagField, TiffDocument};
pub use error::GeoTiffError;
pub use scale::{pixel_scale, pixel_scale_with, PixelScale};
pub use tiepoint::{tie_points, tie_points_with, TiePoint};

/// Which IFD a GeoTIFF tag value is read from once some IFD reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IfdLookup {
    /// Presence is checked in every IFD but the value always comes from
    /// IFD 0. Tags that only live in a later IFD come back as not found.
    #[default]
    First,
    /// Read the value from the first IFD that has the tag.
    Matching,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeoReference {
    pub tie_points: Vec<TiePoint>,
    pub pixel_scale: PixelScale,
}

impl Display for GeoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "GeoTIFF Tags:")?;
        write!(f, "  Pixel Scale: {}", self.pixel_scale)?;
        for tie_point in self.tie_points.iter() {
            write!(f, "\n  Tiepoint: {tie_point}")?;
        }
        Ok(())
    }
}

pub fn georeference<D: TiffDocument>(doc: &D) -> Result<GeoReference, GeoTiffError> {
    georeference_with(doc, IfdLookup::default())
}

pub fn georeference_with<D: TiffDocument>(
    doc: &D,
    lookup: IfdLookup,
) -> Result<GeoReference, GeoTiffError> {
    Ok(GeoReference {
        tie_points: tie_points_with(doc, lookup)?,
        pixel_scale: pixel_scale_with(doc, lookup)?,
    })
}

type FieldOf<D> = <<D as TiffDocument>::Directory as TagDirectory>::Field;

fn find_field<D: TiffDocument>(
    doc: &D,
    id: TagId,
    lookup: IfdLookup,
) -> Result<&FieldOf<D>, GeoTiffError> {
    let code = id.code();
    let directories = doc.directories();
    let index = directories
        .iter()
        .position(|directory| directory.has_field(code))
        .ok_or(GeoTiffError::TagNotFound(id))?;
    debug!("{id:?} found in IFD {index}");

    let source = match lookup {
        IfdLookup::First => 0,
        IfdLookup::Matching => index,
    };
    directories
        .get(source)
        .and_then(|directory| directory.field(code))
        .ok_or_else(|| {
            warn!("{id:?} found in IFD {index} but is read from IFD {source}, which lacks it");
            GeoTiffError::TagNotFound(id)
        })
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::tiff::Endian;

    const SCALE: u16 = 33550;
    const TIEPOINT: u16 = 33922;

    #[test]
    fn georeference_collects_both_tags() {
        let doc = MemDocument(vec![MemDirectory::default()
            .with(SCALE, MemField::doubles(&[30.0, 30.0, 0.0], Endian::Little))
            .with(
                TIEPOINT,
                MemField::doubles(&[0.0, 0.0, 0.0, 440720.0, 3751320.0, 0.0], Endian::Little),
            )]);
        let geo = georeference(&doc).unwrap();
        assert_eq!(geo.pixel_scale, PixelScale { x: 30.0, y: 30.0, z: 0.0 });
        assert_eq!(geo.tie_points.len(), 1);
        assert_eq!(geo.tie_points[0].model(), (440720.0, 3751320.0, 0.0));
    }

    #[test]
    fn missing_tags_are_not_found() {
        let doc = MemDocument(vec![
            MemDirectory::default().with(256, MemField::doubles(&[1.0], Endian::Big)),
            MemDirectory::default(),
        ]);
        assert_eq!(
            tie_points(&doc),
            Err(GeoTiffError::TagNotFound(TagId::ModelTiepoint))
        );
        assert_eq!(
            pixel_scale(&doc),
            Err(GeoTiffError::TagNotFound(TagId::ModelPixelScale))
        );
        assert_eq!(
            georeference(&MemDocument(vec![])),
            Err(GeoTiffError::TagNotFound(TagId::ModelTiepoint))
        );
    }

    #[test]
    fn first_lookup_reads_ifd0_even_when_later_ifd_matched() {
        let doc = MemDocument(vec![
            MemDirectory::default(),
            MemDirectory::default()
                .with(SCALE, MemField::doubles(&[2.0, 2.0, 0.0], Endian::Big)),
        ]);
        assert_eq!(
            pixel_scale_with(&doc, IfdLookup::First),
            Err(GeoTiffError::TagNotFound(TagId::ModelPixelScale))
        );
        assert_eq!(
            pixel_scale_with(&doc, IfdLookup::Matching),
            Ok(PixelScale { x: 2.0, y: 2.0, z: 0.0 })
        );
    }

    #[test]
    fn first_lookup_prefers_ifd0_value() {
        let doc = MemDocument(vec![
            MemDirectory::default()
                .with(SCALE, MemField::doubles(&[1.0, 1.0, 0.0], Endian::Big)),
            MemDirectory::default()
                .with(SCALE, MemField::doubles(&[8.0, 8.0, 0.0], Endian::Big)),
        ]);
        assert_eq!(pixel_scale(&doc).unwrap().x, 1.0);
        assert_eq!(pixel_scale_with(&doc, IfdLookup::Matching).unwrap().x, 1.0);
    }

    #[test]
    fn display_lists_scale_and_tiepoints() {
        let geo = GeoReference {
            tie_points: vec![TiePoint {
                i: 0.0,
                j: 0.0,
                k: 0.0,
                x: 100.5,
                y: -20.0,
                z: 0.0,
            }],
            pixel_scale: PixelScale {
                x: 0.5,
                y: 0.5,
                z: 0.0,
            },
        };
        assert_eq!(
            format!("{geo}"),
            "GeoTIFF Tags:\n  Pixel Scale: (0.5, 0.5, 0)\n  Tiepoint: (0, 0, 0) -> (100.5, -20, 0)"
        );
    }
}
