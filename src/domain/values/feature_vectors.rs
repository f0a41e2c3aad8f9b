use crate::domain::error::DomainError;
use crate::domain::values::feature_array::FeatureArray;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Feature payload of a video: a list of arrays, or one combined array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureVectors {
    Sequence(Vec<FeatureArray>),
    Single(FeatureArray),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorsShape {
    Single,
    Sequence,
}

impl fmt::Display for VectorsShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorsShape::Single => write!(f, "single"),
            VectorsShape::Sequence => write!(f, "sequence"),
        }
    }
}

impl FromStr for VectorsShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(VectorsShape::Single),
            "sequence" => Ok(VectorsShape::Sequence),
            _ => Err(format!("Unknown vectors shape: {s}")),
        }
    }
}

/// Binary form of [`FeatureVectors`], one blob per array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedVectors {
    Single(Vec<u8>),
    Sequence(Vec<Vec<u8>>),
}

impl FeatureVectors {
    pub fn shape(&self) -> VectorsShape {
        match self {
            FeatureVectors::Single(_) => VectorsShape::Single,
            FeatureVectors::Sequence(_) => VectorsShape::Sequence,
        }
    }

    /// Number of feature vectors: list length, or rows of a combined array.
    pub fn count(&self) -> usize {
        match self {
            FeatureVectors::Sequence(arrays) => arrays.len(),
            FeatureVectors::Single(array) => array.rows(),
        }
    }

    pub fn encode(&self) -> EncodedVectors {
        match self {
            FeatureVectors::Single(array) => EncodedVectors::Single(array.encode()),
            FeatureVectors::Sequence(arrays) => {
                EncodedVectors::Sequence(arrays.iter().map(FeatureArray::encode).collect())
            }
        }
    }

    pub fn decode(encoded: &EncodedVectors) -> Result<Self, DomainError> {
        match encoded {
            EncodedVectors::Single(bytes) => Ok(FeatureVectors::Single(FeatureArray::decode(bytes)?)),
            EncodedVectors::Sequence(blobs) => blobs
                .iter()
                .map(|b| FeatureArray::decode(b))
                .collect::<Result<Vec<_>, _>>()
                .map(FeatureVectors::Sequence),
        }
    }
}

impl EncodedVectors {
    pub fn shape(&self) -> VectorsShape {
        match self {
            EncodedVectors::Single(_) => VectorsShape::Single,
            EncodedVectors::Sequence(_) => VectorsShape::Sequence,
        }
    }

    /// Packs the payload into one column value. A sequence becomes a `u32`
    /// count followed by `u64` length-prefixed frames, all little-endian.
    pub fn to_blob(&self) -> Vec<u8> {
        match self {
            EncodedVectors::Single(bytes) => bytes.clone(),
            EncodedVectors::Sequence(blobs) => {
                let total: usize = blobs.iter().map(|b| b.len() + 8).sum();
                let mut out = Vec::with_capacity(4 + total);
                out.extend_from_slice(&(blobs.len() as u32).to_le_bytes());
                for blob in blobs {
                    out.extend_from_slice(&(blob.len() as u64).to_le_bytes());
                    out.extend_from_slice(blob);
                }
                out
            }
        }
    }

    pub fn from_blob(shape: VectorsShape, blob: Vec<u8>) -> Result<Self, DomainError> {
        match shape {
            VectorsShape::Single => Ok(EncodedVectors::Single(blob)),
            VectorsShape::Sequence => {
                let truncated = || DomainError::Decode("Truncated vector sequence".into());
                let count_bytes = blob.get(..4).ok_or_else(truncated)?;
                let count = u32::from_le_bytes([
                    count_bytes[0],
                    count_bytes[1],
                    count_bytes[2],
                    count_bytes[3],
                ]) as usize;

                let mut blobs = Vec::with_capacity(count.min(blob.len()));
                let mut pos = 4;
                for _ in 0..count {
                    let len_bytes = blob.get(pos..pos + 8).ok_or_else(truncated)?;
                    let mut len = [0u8; 8];
                    len.copy_from_slice(len_bytes);
                    let len = u64::from_le_bytes(len) as usize;
                    pos += 8;
                    let end = pos.checked_add(len).ok_or_else(truncated)?;
                    blobs.push(blob.get(pos..end).ok_or_else(truncated)?.to_vec());
                    pos = end;
                }
                if pos != blob.len() {
                    return Err(DomainError::Decode(format!(
                        "{} trailing bytes after vector sequence",
                        blob.len() - pos
                    )));
                }
                Ok(EncodedVectors::Sequence(blobs))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::feature_array::FeatureData;

    fn sample_sequence() -> FeatureVectors {
        FeatureVectors::Sequence(vec![
            FeatureArray::from_f64(vec![0.1, 0.2]),
            FeatureArray::from_f32(vec![f32::NAN, f32::INFINITY]),
            FeatureArray::from_f64(vec![]),
        ])
    }

    #[test]
    fn test_sequence_survives_blob_packing() {
        let vectors = sample_sequence();
        let encoded = vectors.encode();
        let unpacked = EncodedVectors::from_blob(encoded.shape(), encoded.to_blob()).unwrap();
        assert_eq!(unpacked, encoded);
        assert_eq!(FeatureVectors::decode(&unpacked).unwrap(), vectors);
    }

    #[test]
    fn test_single_array_survives_blob_packing() {
        let matrix =
            FeatureArray::new(vec![3, 2], FeatureData::F32(vec![1.0; 6])).unwrap();
        let vectors = FeatureVectors::Single(matrix);
        let encoded = vectors.encode();
        let unpacked = EncodedVectors::from_blob(VectorsShape::Single, encoded.to_blob()).unwrap();
        assert_eq!(FeatureVectors::decode(&unpacked).unwrap(), vectors);
        assert_eq!(vectors.count(), 3);
    }

    #[test]
    fn test_empty_sequence() {
        let vectors = FeatureVectors::Sequence(vec![]);
        let encoded = vectors.encode();
        let unpacked = EncodedVectors::from_blob(VectorsShape::Sequence, encoded.to_blob()).unwrap();
        assert_eq!(FeatureVectors::decode(&unpacked).unwrap(), vectors);
        assert_eq!(vectors.count(), 0);
    }

    #[test]
    fn test_truncated_sequence_is_decode_error() {
        let mut blob = sample_sequence().encode().to_blob();
        blob.pop();
        let err = EncodedVectors::from_blob(VectorsShape::Sequence, blob).unwrap_err();
        assert!(matches!(err, DomainError::Decode(_)));
    }

    #[test]
    fn test_corrupt_element_is_decode_error() {
        let encoded = EncodedVectors::Sequence(vec![b"garbage-bytes".to_vec()]);
        assert!(matches!(
            FeatureVectors::decode(&encoded),
            Err(DomainError::Decode(_))
        ));
    }

    #[test]
    fn test_json_nested_lists_are_a_sequence() {
        let vectors: FeatureVectors = serde_json::from_str("[[0.1, 0.2], [0.3, 0.4]]").unwrap();
        assert_eq!(vectors.shape(), VectorsShape::Sequence);
        assert_eq!(vectors.count(), 2);

        let single: FeatureVectors = serde_json::from_str("[0.1, 0.2, 0.3]").unwrap();
        assert_eq!(single.shape(), VectorsShape::Single);
    }
}
