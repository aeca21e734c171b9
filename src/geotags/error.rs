use super::DecodeError;
use crate::tiff::TagId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoTiffError {
    #[error("{0:?} not found")]
    TagNotFound(TagId),
    #[error("bad {tag:?} payload: {source}")]
    Decode {
        tag: TagId,
        #[source]
        source: DecodeError,
    },
    #[error("unexpected count {count} of {tag:?}")]
    InvalidTupleCount { tag: TagId, count: usize },
}
