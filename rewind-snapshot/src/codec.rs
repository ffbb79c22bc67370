//! Snapshot encoding.
//!
//! A codec turns a subject into durable bytes and back into an independent value.
//! The default [`JsonCodec`] wraps the state in a small envelope carrying a format
//! version and the Rust type name, so bytes recorded for one type are never decoded
//! as another. Values JSON would store lossily, such as NaN or infinite floats, are
//! refused at encode time rather than discovered on undo.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use rewind_core::CodecError;

use crate::finite::ensure_finite;

/// Envelope format written by [`JsonCodec`].
pub const SNAPSHOT_FORMAT: u32 = 1;

/// Encode/decode pair used by snapshot histories.
pub trait Codec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode a fresh value. Never returns a value sharing state with the original.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    format: u32,
    type_name: &'a str,
    state: &'a T,
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    format: u32,
    type_name: String,
}

#[derive(Deserialize)]
struct EnvelopeState<T> {
    state: T,
}

/// JSON snapshots via `serde_json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output, handy when inspecting snapshots by eye.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let type_name = std::any::type_name::<T>();
        ensure_finite(value).map_err(|e| CodecError::Encode {
            type_name,
            source: e.into(),
        })?;
        let envelope = EnvelopeRef {
            format: SNAPSHOT_FORMAT,
            type_name,
            state: value,
        };
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&envelope)
        } else {
            serde_json::to_vec(&envelope)
        };
        bytes.map_err(|e| CodecError::Encode {
            type_name,
            source: e.into(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let type_name = std::any::type_name::<T>();
        let header: EnvelopeHeader =
            serde_json::from_slice(bytes).map_err(|e| CodecError::Decode {
                type_name,
                source: e.into(),
            })?;

        if header.format != SNAPSHOT_FORMAT {
            return Err(CodecError::UnsupportedFormat {
                expected: SNAPSHOT_FORMAT,
                found: header.format,
            });
        }
        if header.type_name != type_name {
            return Err(CodecError::TypeMismatch {
                expected: type_name,
                found: header.type_name,
            });
        }

        // Parsed straight from the bytes so wide integers and exact floats survive.
        let envelope: EnvelopeState<T> =
            serde_json::from_slice(bytes).map_err(|e| CodecError::Decode {
                type_name,
                source: e.into(),
            })?;
        Ok(envelope.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Layer {
        name: String,
        opacity: f32,
        tags: Vec<String>,
        parent: Option<Box<Layer>>,
    }

    fn layer() -> Layer {
        Layer {
            name: "ink".into(),
            opacity: 0.75,
            tags: vec!["line".into(), "top".into()],
            parent: Some(Box::new(Layer {
                name: "paper".into(),
                opacity: 1.0,
                tags: vec![],
                parent: None,
            })),
        }
    }

    #[test]
    fn test_nested_state_survives() {
        let codec = JsonCodec::new();
        let original = layer();
        let bytes = codec.encode(&original).unwrap();
        let decoded: Layer = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_pretty_output_decodes() {
        let codec = JsonCodec::pretty();
        let bytes = codec.encode(&layer()).unwrap();
        assert!(bytes.contains(&b'\n'));
        let decoded: Layer = JsonCodec::new().decode(&bytes).unwrap();
        assert_eq!(decoded, layer());
    }

    #[test]
    fn test_non_string_keys_fail_to_encode() {
        let mut grid = HashMap::new();
        grid.insert((1, 2), "cell");
        let err = JsonCodec::new().encode(&grid).unwrap_err();
        assert!(matches!(err, CodecError::Encode { .. }));
    }

    #[test]
    fn test_type_mismatch_detected() {
        let codec = JsonCodec::new();
        let bytes = codec.encode(&42u32).unwrap();
        let err = codec.decode::<String>(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn test_malformed_bytes_fail_to_decode() {
        let codec = JsonCodec::new();
        assert!(matches!(
            codec.decode::<u32>(b"not json"),
            Err(CodecError::Decode { .. })
        ));
        // Plain JSON without the envelope carries no type information.
        assert!(matches!(
            codec.decode::<u32>(b"42"),
            Err(CodecError::Decode { .. })
        ));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let bytes = br#"{"format":9,"type_name":"u32","state":1}"#;
        assert!(matches!(
            JsonCodec::new().decode::<u32>(bytes),
            Err(CodecError::UnsupportedFormat { found: 9, .. })
        ));
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Gauge {
        level: Option<f32>,
        scale: f32,
    }

    #[test]
    fn test_non_finite_floats_fail_to_encode() {
        let codec = JsonCodec::new();
        for gauge in [
            Gauge { level: Some(f32::NAN), scale: 1.0 },
            Gauge { level: None, scale: f32::INFINITY },
            Gauge { level: Some(f32::NEG_INFINITY), scale: 1.0 },
        ] {
            let err = codec.encode(&gauge).unwrap_err();
            assert!(matches!(err, CodecError::Encode { .. }), "{gauge:?}");
        }
        assert!(codec.encode(&vec![0.5f64, f64::NAN]).is_err());
    }

    #[test]
    fn test_non_finite_error_names_field() {
        let gauge = Gauge { level: Some(f32::NAN), scale: 1.0 };
        let err = JsonCodec::new().encode(&gauge).unwrap_err();
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("`level`"), "{source}");
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Extremes {
        wide: u128,
        signed: i128,
        min: i64,
        max: u64,
        tiny: f64,
        huge: f64,
        subnormal: f64,
        sum: f64,
        neg_zero: f64,
        small: f32,
        text: String,
        absent: Option<f32>,
    }

    #[test]
    fn test_edge_values_survive_exactly() {
        let original = Extremes {
            wide: u128::MAX,
            signed: i128::MIN,
            min: i64::MIN,
            max: u64::MAX,
            tiny: f64::MIN_POSITIVE,
            huge: f64::MAX,
            subnormal: 5e-324,
            sum: 0.1 + 0.2,
            neg_zero: -0.0,
            small: f32::MIN_POSITIVE,
            text: "quote \" tab \t nul \u{0} emoji \u{1F600}".into(),
            absent: None,
        };
        for codec in [JsonCodec::new(), JsonCodec::pretty()] {
            let bytes = codec.encode(&original).unwrap();
            let decoded: Extremes = codec.decode(&bytes).unwrap();
            assert_eq!(decoded, original);
            assert_eq!(decoded.sum.to_bits(), original.sum.to_bits());
            assert_eq!(decoded.subnormal.to_bits(), original.subnormal.to_bits());
            assert!(decoded.neg_zero.is_sign_negative());
        }
    }
}
