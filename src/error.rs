use crate::geotags::GeoTiffError;
use crate::tiff::TiffError;
use std::io;
use thiserror::Error;

pub type GeoTiepointsResult<T> = Result<T, GeoTiepointsError>;

#[derive(Debug, Error)]
pub enum GeoTiepointsError {
    #[error(transparent)]
    BadTiff(TiffError),
    #[error(transparent)]
    BadGeoTiff(#[from] GeoTiffError),
    #[error("read error: {0}")]
    ReadError(#[from] io::Error),
}

impl From<TiffError> for GeoTiepointsError {
    fn from(e: TiffError) -> Self {
        match e {
            TiffError::ReadError(io_error) => GeoTiepointsError::ReadError(io_error),
            tiff_error => GeoTiepointsError::BadTiff(tiff_error),
        }
    }
}
