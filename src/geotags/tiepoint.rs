use super::{decode_field_f64s, find_field, GeoTiffError, IfdLookup, TagField, TiffDocument};
use crate::tiff::TagId;
use std::fmt::Display;

const TIEPOINT_LEN: usize = 6;

/// Raster point `(i, j, k)` tied to model coordinates `(x, y, z)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiePoint {
    pub i: f64,
    pub j: f64,
    pub k: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TiePoint {
    fn from_chunk(chunk: &[f64]) -> Self {
        Self {
            i: chunk[0],
            j: chunk[1],
            k: chunk[2],
            x: chunk[3],
            y: chunk[4],
            z: chunk[5],
        }
    }

    pub fn pixel(&self) -> (f64, f64, f64) {
        (self.i, self.j, self.k)
    }

    pub fn model(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl Display for TiePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}) -> ({}, {}, {})",
            self.i, self.j, self.k, self.x, self.y, self.z
        )
    }
}

pub fn tie_points<D: TiffDocument>(doc: &D) -> Result<Vec<TiePoint>, GeoTiffError> {
    tie_points_with(doc, IfdLookup::default())
}

/// Decodes ModelTiepointTag into tie points, in tag order.
///
/// An empty tag gives an empty list.
pub fn tie_points_with<D: TiffDocument>(
    doc: &D,
    lookup: IfdLookup,
) -> Result<Vec<TiePoint>, GeoTiffError> {
    let tag = TagId::ModelTiepoint;
    let field = find_field(doc, tag, lookup)?;

    let count = field.count();
    if count % TIEPOINT_LEN != 0 {
        return Err(GeoTiffError::InvalidTupleCount { tag, count });
    }

    let values =
        decode_field_f64s(field).map_err(|source| GeoTiffError::Decode { tag, source })?;

    Ok(values
        .chunks_exact(TIEPOINT_LEN)
        .map(TiePoint::from_chunk)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geotags::testing::*;
    use crate::geotags::{encode_f64s, DecodeError};
    use crate::tiff::Endian;

    fn single(field: MemField) -> MemDocument {
        MemDocument(vec![MemDirectory::default().with(33922, field)])
    }

    #[test]
    fn maps_positions_to_ijkxyz() {
        let doc = single(MemField::doubles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], Endian::Big));
        assert_eq!(
            tie_points(&doc),
            Ok(vec![TiePoint {
                i: 1.0,
                j: 2.0,
                k: 3.0,
                x: 4.0,
                y: 5.0,
                z: 6.0
            }])
        );
    }

    #[test]
    fn groups_little_endian_tuples_in_order() {
        let values: Vec<f64> = (0..12).map(|v| v as f64 * 1.5).collect();
        let doc = single(MemField::doubles(&values, Endian::Little));
        let points = tie_points(&doc).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].pixel(), (0.0, 1.5, 3.0));
        assert_eq!(points[0].model(), (4.5, 6.0, 7.5));
        assert_eq!(points[1].pixel(), (9.0, 10.5, 12.0));
        assert_eq!(points[1].model(), (13.5, 15.0, 16.5));
    }

    #[test]
    fn empty_tag_gives_no_points() {
        let doc = single(MemField::doubles(&[], Endian::Little));
        assert_eq!(tie_points(&doc), Ok(vec![]));
    }

    #[test]
    fn rejects_count_not_divisible_by_six() {
        for n in [1, 5, 7, 11] {
            let values = vec![0.0; n];
            let doc = single(MemField::doubles(&values, Endian::Little));
            assert_eq!(
                tie_points(&doc),
                Err(GeoTiffError::InvalidTupleCount {
                    tag: TagId::ModelTiepoint,
                    count: n
                })
            );
        }
    }

    #[test]
    fn rejects_unaligned_payload() {
        let mut bytes = encode_f64s(&[0.0; 6], Endian::Big);
        bytes.truncate(44);
        let doc = single(MemField {
            count: 6,
            bytes,
            endian: Endian::Big,
        });
        assert_eq!(
            tie_points(&doc),
            Err(GeoTiffError::Decode {
                tag: TagId::ModelTiepoint,
                source: DecodeError::MalformedLength { len: 44 }
            })
        );
    }

    #[test]
    fn rejects_payload_shorter_than_count() {
        let doc = single(MemField {
            count: 12,
            bytes: encode_f64s(&[0.0; 6], Endian::Big),
            endian: Endian::Big,
        });
        assert_eq!(
            tie_points(&doc),
            Err(GeoTiffError::Decode {
                tag: TagId::ModelTiepoint,
                source: DecodeError::CountMismatch {
                    count: 12,
                    decoded: 6
                }
            })
        );
    }

    #[test]
    fn display_shows_pixel_and_model() {
        let point = TiePoint {
            i: 0.5,
            j: 0.5,
            k: 0.0,
            x: 151.25,
            y: -33.75,
            z: 0.0,
        };
        assert_eq!(format!("{point}"), "(0.5, 0.5, 0) -> (151.25, -33.75, 0)");
    }
}
