use crate::domain::error::DomainError;
use crate::domain::values::dtype::Dtype;
use serde::{Deserialize, Serialize};

/// Leading bytes of every encoded array. The last byte is the format version.
pub const MAGIC: &[u8; 4] = b"VFA1";

const HEADER_LEN: usize = MAGIC.len() + 1 + 4;

#[derive(Debug, Clone)]
pub enum FeatureData {
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl FeatureData {
    pub fn dtype(&self) -> Dtype {
        match self {
            FeatureData::F32(_) => Dtype::F32,
            FeatureData::F64(_) => Dtype::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FeatureData::F32(v) => v.len(),
            FeatureData::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An n-dimensional array of floats produced by feature extraction.
///
/// The values are opaque to the store: equality is bitwise, so NaN payloads
/// and signed zeros compare exactly as they were written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawFeatureArray", into = "RawFeatureArray")]
pub struct FeatureArray {
    shape: Vec<usize>,
    data: FeatureData,
}

impl FeatureArray {
    pub fn new(shape: Vec<usize>, data: FeatureData) -> Result<Self, DomainError> {
        let expected = element_count(&shape).ok_or_else(|| {
            DomainError::InvalidArgument(format!("Shape {shape:?} overflows"))
        })?;
        if expected != data.len() {
            return Err(DomainError::InvalidArgument(format!(
                "Shape {shape:?} needs {expected} values, got {}",
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    pub fn from_f32(values: Vec<f32>) -> Self {
        Self {
            shape: vec![values.len()],
            data: FeatureData::F32(values),
        }
    }

    pub fn from_f64(values: Vec<f64>) -> Self {
        Self {
            shape: vec![values.len()],
            data: FeatureData::F64(values),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &FeatureData {
        &self.data
    }

    pub fn dtype(&self) -> Dtype {
        self.data.dtype()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the leading axis: rows of a matrix, 1 for a scalar.
    pub fn rows(&self) -> usize {
        self.shape.first().copied().unwrap_or(1)
    }

    pub fn encode(&self) -> Vec<u8> {
        let dtype = self.dtype();
        let mut out =
            Vec::with_capacity(HEADER_LEN + self.shape.len() * 8 + self.len() * dtype.size());
        out.extend_from_slice(MAGIC);
        out.push(dtype.tag());
        out.extend_from_slice(&(self.shape.len() as u32).to_le_bytes());
        for dim in &self.shape {
            out.extend_from_slice(&(*dim as u64).to_le_bytes());
        }
        match &self.data {
            FeatureData::F32(v) => out.extend(v.iter().flat_map(|f| f.to_le_bytes())),
            FeatureData::F64(v) => out.extend(v.iter().flat_map(|f| f.to_le_bytes())),
        }
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DomainError> {
        if bytes.len() < HEADER_LEN {
            return Err(DomainError::Decode(format!(
                "Payload too short: {} bytes",
                bytes.len()
            )));
        }
        if bytes[..3] != MAGIC[..3] {
            return Err(DomainError::Decode("Payload is not a feature array".into()));
        }
        if bytes[3] != MAGIC[3] {
            return Err(DomainError::Decode(format!(
                "Unsupported feature array version {}",
                bytes[3] as char
            )));
        }
        let dtype = Dtype::from_tag(bytes[4])
            .ok_or_else(|| DomainError::Decode(format!("Unknown dtype tag {}", bytes[4])))?;
        let ndim = u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]) as usize;

        let body = &bytes[HEADER_LEN..];
        let dims_len = ndim
            .checked_mul(8)
            .filter(|n| *n <= body.len())
            .ok_or_else(|| DomainError::Decode(format!("Truncated shape ({ndim} dims)")))?;
        let shape: Vec<usize> = body[..dims_len]
            .chunks_exact(8)
            .map(|c| u64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]) as usize)
            .collect();

        let values = &body[dims_len..];
        let count = element_count(&shape)
            .ok_or_else(|| DomainError::Decode(format!("Shape {shape:?} overflows")))?;
        if count.checked_mul(dtype.size()) != Some(values.len()) {
            return Err(DomainError::Decode(format!(
                "Shape {shape:?} of {dtype} needs {count} values, payload holds {} bytes",
                values.len()
            )));
        }

        let data = match dtype {
            Dtype::F32 => FeatureData::F32(
                values
                    .chunks_exact(4)
                    .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
            Dtype::F64 => FeatureData::F64(
                values
                    .chunks_exact(8)
                    .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                    .collect(),
            ),
        };
        Ok(Self { shape, data })
    }
}

impl PartialEq for FeatureArray {
    fn eq(&self, other: &Self) -> bool {
        if self.shape != other.shape {
            return false;
        }
        match (&self.data, &other.data) {
            (FeatureData::F32(a), FeatureData::F32(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (FeatureData::F64(a), FeatureData::F64(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            _ => false,
        }
    }
}

fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, d| acc.checked_mul(*d))
}

/// JSON form: either a bare list of numbers (a 1-d f64 vector) or
/// `{"dtype": "f32", "shape": [2, 3], "values": [...]}`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawFeatureArray {
    Full {
        #[serde(default)]
        dtype: Dtype,
        #[serde(default)]
        shape: Option<Vec<usize>>,
        values: Vec<JsonFloat>,
    },
    Bare(Vec<JsonFloat>),
}

/// A float in JSON. Non-finite values travel as `"NaN"`, `"Infinity"` and
/// `"-Infinity"` since JSON numbers cannot hold them.
#[derive(Debug, Clone, Copy)]
struct JsonFloat(f64);

impl Serialize for JsonFloat {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_nan() {
            serializer.serialize_str("NaN")
        } else if v == f64::INFINITY {
            serializer.serialize_str("Infinity")
        } else if v == f64::NEG_INFINITY {
            serializer.serialize_str("-Infinity")
        } else {
            serializer.serialize_f64(v)
        }
    }
}

impl<'de> Deserialize<'de> for JsonFloat {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct JsonFloatVisitor;

        impl serde::de::Visitor<'_> for JsonFloatVisitor {
            type Value = JsonFloat;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a number, \"NaN\", \"Infinity\" or \"-Infinity\"")
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<JsonFloat, E> {
                Ok(JsonFloat(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<JsonFloat, E> {
                Ok(JsonFloat(v as f64))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<JsonFloat, E> {
                Ok(JsonFloat(v as f64))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<JsonFloat, E> {
                match v {
                    "NaN" => Ok(JsonFloat(f64::NAN)),
                    "Infinity" => Ok(JsonFloat(f64::INFINITY)),
                    "-Infinity" => Ok(JsonFloat(f64::NEG_INFINITY)),
                    _ => Err(E::invalid_value(serde::de::Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(JsonFloatVisitor)
    }
}

impl TryFrom<RawFeatureArray> for FeatureArray {
    type Error = DomainError;

    fn try_from(raw: RawFeatureArray) -> Result<Self, Self::Error> {
        match raw {
            RawFeatureArray::Bare(values) => Ok(FeatureArray::from_f64(
                values.into_iter().map(|v| v.0).collect(),
            )),
            RawFeatureArray::Full {
                dtype,
                shape,
                values,
            } => {
                let shape = shape.unwrap_or_else(|| vec![values.len()]);
                let data = match dtype {
                    Dtype::F32 => FeatureData::F32(
                        values
                            .into_iter()
                            .map(|JsonFloat(v)| {
                                let narrowed = v as f32;
                                if v.is_finite() && !narrowed.is_finite() {
                                    return Err(DomainError::InvalidArgument(format!(
                                        "{v} is out of range for f32"
                                    )));
                                }
                                Ok(narrowed)
                            })
                            .collect::<Result<Vec<_>, _>>()?,
                    ),
                    Dtype::F64 => FeatureData::F64(values.into_iter().map(|v| v.0).collect()),
                };
                FeatureArray::new(shape, data)
            }
        }
    }
}

impl From<FeatureArray> for RawFeatureArray {
    fn from(array: FeatureArray) -> Self {
        let dtype = array.dtype();
        let values = match array.data {
            FeatureData::F32(v) => v.into_iter().map(|f| JsonFloat(f64::from(f))).collect(),
            FeatureData::F64(v) => v.into_iter().map(JsonFloat).collect(),
        };
        RawFeatureArray::Full {
            dtype,
            shape: Some(array.shape),
            values,
        }
    }
}
