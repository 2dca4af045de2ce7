//! Unpadded base64url encoding for token segments.

// crates.io
use base64::{
	DecodeError, Engine as _,
	alphabet::URL_SAFE,
	engine::{
		DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::URL_SAFE_NO_PAD,
	},
};

// Accepts segments with or without trailing `=`.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
	&URL_SAFE,
	GeneralPurposeConfig::new()
		.with_encode_padding(false)
		.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes raw bytes (typically UTF-8 JSON) as an unpadded base64url segment.
///
/// The output never contains `+`, `/`, or `=`.
pub fn encode_segment(value: impl AsRef<[u8]>) -> String {
	URL_SAFE_NO_PAD.encode(value)
}

/// Decodes a base64url segment produced by [`encode_segment`], tolerating re-added padding.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, DecodeError> {
	URL_SAFE_LENIENT.decode(segment)
}
