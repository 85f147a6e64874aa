//! Per-message wire codecs
//!
//! Three codecs are supported: raw snappy blocks, gzip streams, and the
//! legacy size-prepended LZ4 block framing. The codec is chosen from the
//! message's declared attribute, per message; decoding with a mismatched
//! codec is a typed error, never a silent substitution.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

use crate::broker::WireCodec;

/// A per-message codec failure.
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// The payload did not decode under its declared codec
    #[error("{codec} payload failed to decode: {reason}")]
    Malformed {
        /// Codec the message declared
        codec: WireCodec,
        /// Decoder failure detail
        reason: String,
    },

    /// The payload could not be encoded
    #[error("{codec} payload failed to encode: {reason}")]
    Encode {
        /// Codec requested
        codec: WireCodec,
        /// Encoder failure detail
        reason: String,
    },
}

impl CodecError {
    fn malformed(codec: WireCodec, reason: impl ToString) -> Self {
        Self::Malformed {
            codec,
            reason: reason.to_string(),
        }
    }

    fn encode(codec: WireCodec, reason: impl ToString) -> Self {
        Self::Encode {
            codec,
            reason: reason.to_string(),
        }
    }
}

/// Decompresses a payload under the given codec.
pub fn decode(codec: WireCodec, payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    match codec {
        WireCodec::Snappy => snap::raw::Decoder::new()
            .decompress_vec(payload)
            .map_err(|e| CodecError::malformed(codec, e)),
        WireCodec::Gzip => {
            let mut out = Vec::new();
            GzDecoder::new(payload)
                .read_to_end(&mut out)
                .map_err(|e| CodecError::malformed(codec, e))?;
            Ok(out)
        }
        WireCodec::Lz4Legacy => lz4_flex::decompress_size_prepended(payload)
            .map_err(|e| CodecError::malformed(codec, e)),
    }
}

/// Compresses a payload under the given codec.
pub fn encode(codec: WireCodec, payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    match codec {
        WireCodec::Snappy => snap::raw::Encoder::new()
            .compress_vec(payload)
            .map_err(|e| CodecError::encode(codec, e)),
        WireCodec::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder
                .write_all(payload)
                .map_err(|e| CodecError::encode(codec, e))?;
            encoder.finish().map_err(|e| CodecError::encode(codec, e))
        }
        WireCodec::Lz4Legacy => Ok(lz4_flex::compress_prepend_size(payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"{\"speed\": 42.0, \"heading\": 180}";

    #[test]
    fn test_snappy_round_trip() {
        let packed = encode(WireCodec::Snappy, SAMPLE).unwrap();
        assert_eq!(decode(WireCodec::Snappy, &packed).unwrap(), SAMPLE);
    }

    #[test]
    fn test_gzip_round_trip() {
        let packed = encode(WireCodec::Gzip, SAMPLE).unwrap();
        assert_eq!(decode(WireCodec::Gzip, &packed).unwrap(), SAMPLE);
    }

    #[test]
    fn test_lz4_legacy_round_trip() {
        let packed = encode(WireCodec::Lz4Legacy, SAMPLE).unwrap();
        assert_eq!(decode(WireCodec::Lz4Legacy, &packed).unwrap(), SAMPLE);
    }

    #[test]
    fn test_mismatched_codec_is_an_error() {
        let packed = encode(WireCodec::Gzip, SAMPLE).unwrap();
        let err = decode(WireCodec::Snappy, &packed).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Malformed {
                codec: WireCodec::Snappy,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_payload_round_trips() {
        for codec in [WireCodec::Snappy, WireCodec::Gzip, WireCodec::Lz4Legacy] {
            let packed = encode(codec, b"").unwrap();
            assert_eq!(decode(codec, &packed).unwrap(), b"");
        }
    }
}
