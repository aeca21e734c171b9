use super::TagField;
use crate::tiff::Endian;
use thiserror::Error;

const F64_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{len} bytes is not a whole number of 8-byte doubles")]
    MalformedLength { len: usize },
    #[error("field declares {count} values but holds {decoded}")]
    CountMismatch { count: usize, decoded: usize },
}

/// Reinterprets each 8-byte chunk of `bytes` as an IEEE-754 double.
///
/// Chunks are read as `u64` in `endian` and their bits taken as-is, so
/// `encode_f64s(&decode_f64s(b, e)?, e) == b` for every aligned `b`.
pub fn decode_f64s(bytes: &[u8], endian: Endian) -> Result<Vec<f64>, DecodeError> {
    if bytes.len() % F64_SIZE != 0 {
        return Err(DecodeError::MalformedLength { len: bytes.len() });
    }
    let bits = endian
        .decode_all::<F64_SIZE, u64>(bytes)
        .ok_or(DecodeError::MalformedLength { len: bytes.len() })?;
    Ok(bits.into_iter().map(f64::from_bits).collect())
}

pub fn encode_f64s(values: &[f64], endian: Endian) -> Vec<u8> {
    let bits: Vec<u64> = values.iter().map(|v| v.to_bits()).collect();
    endian.encode_all(&bits)
}

/// Decodes a field's payload and checks it against the declared count.
pub fn decode_field_f64s<F: TagField>(field: &F) -> Result<Vec<f64>, DecodeError> {
    let values = decode_f64s(field.bytes(), field.endian())?;
    if values.len() != field.count() {
        return Err(DecodeError::CountMismatch {
            count: field.count(),
            decoded: values.len(),
        });
    }
    Ok(values)
}
