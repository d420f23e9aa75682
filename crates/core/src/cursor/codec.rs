//! Cursor token codec.
//!
//! Wire format, innermost to outermost:
//!
//! 1. every field value is rendered as its JSON text, so strings keep
//!    their quotes while numbers and booleans appear bare;
//! 2. fields are assembled into an `application/x-www-form-urlencoded`
//!    query string (`after=%221%22&ranking=1111`);
//! 3. the payload is wrapped in unpadded base64url.
//!
//! Decoding runs the exact inverse and re-hydrates each value through
//! JSON parsing, so a round trip preserves the scalar type of every
//! field. A token that fails at any stage is rejected as a whole; the
//! fail-open [`decode`](CursorCodec::decode) entry point turns that
//! rejection into the empty cursor, which callers treat as "first page".

use base64::prelude::*;
use url::form_urlencoded;

use crate::cursor::{Cursor, CursorToken, CursorValue};
use crate::error::{CursorDecodeError, DecodeResult};

/// Encoding and decoding of opaque cursor tokens.
///
/// The orchestrator only ever talks to this capability, never to a
/// concrete wire format, so deployments with legacy token layouts can
/// swap in their own codec.
pub trait CursorCodec: Send + Sync {
    /// Encodes a cursor into its opaque wire form. Never fails.
    fn encode(&self, cursor: &Cursor) -> CursorToken;

    /// Strictly decodes a token, reporting why it was rejected.
    ///
    /// A single bad field rejects the whole token; partial positions
    /// are never produced.
    fn try_decode(&self, token: &str) -> DecodeResult<Cursor>;

    /// Fail-open decode: any rejected token becomes the empty cursor.
    ///
    /// This is the entry point for client-supplied tokens. Expired or
    /// hand-edited cursors restart pagination from the first page
    /// instead of failing the request.
    fn decode(&self, token: &str) -> Cursor {
        self.try_decode(token).unwrap_or_default()
    }
}

/// Standard codec: JSON-typed query-string payload in unpadded base64url.
///
/// All store adapters use this codec, so tokens are interchangeable
/// across backends.
///
/// ```
/// use reprise_core::cursor::{Cursor, CursorCodec, QueryStringCodec};
///
/// let token = QueryStringCodec.encode(&Cursor::resume_after("1"));
/// assert_eq!(token.as_str(), "YWZ0ZXI9JTIyMSUyMg");
/// assert_eq!(QueryStringCodec.decode(token.as_str()), Cursor::resume_after("1"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryStringCodec;

impl CursorCodec for QueryStringCodec {
    fn encode(&self, cursor: &Cursor) -> CursorToken {
        let mut payload = form_urlencoded::Serializer::new(String::new());
        for (name, value) in cursor.iter() {
            payload.append_pair(name, &json_text(value));
        }
        CursorToken::from(BASE64_URL_SAFE_NO_PAD.encode(payload.finish()))
    }

    fn try_decode(&self, token: &str) -> DecodeResult<Cursor> {
        let payload = BASE64_URL_SAFE_NO_PAD.decode(token)?;
        let payload = String::from_utf8(payload)?;

        let mut cursor = Cursor::new();
        for (name, raw) in form_urlencoded::parse(payload.as_bytes()) {
            let json: serde_json::Value =
                serde_json::from_str(&raw).map_err(|_| CursorDecodeError::MalformedValue {
                    field: name.to_string(),
                })?;
            let value =
                CursorValue::from_json(json).ok_or_else(|| CursorDecodeError::NonScalarValue {
                    field: name.to_string(),
                })?;
            cursor.insert(name.into_owned(), value);
        }
        Ok(cursor)
    }
}

/// JSON text of a single scalar, the unit the query string carries.
fn json_text(value: &CursorValue) -> String {
    value.clone().into_json().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_of(payload: &str) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(payload)
    }

    #[test]
    fn encode_string_field() {
        let token = QueryStringCodec.encode(&Cursor::resume_after("1"));
        assert_eq!(token.as_str(), "YWZ0ZXI9JTIyMSUyMg");
    }

    #[test]
    fn encode_two_string_fields() {
        let cursor = Cursor::resume_after("1").with_field("sorting", "2");
        let token = QueryStringCodec.encode(&cursor);
        assert_eq!(token.as_str(), "YWZ0ZXI9JTIyMSUyMiZzb3J0aW5nPSUyMjIlMjI");

        let cursor = Cursor::resume_after("1").with_field("sorting", "22");
        let token = QueryStringCodec.encode(&cursor);
        assert_eq!(token.as_str(), "YWZ0ZXI9JTIyMSUyMiZzb3J0aW5nPSUyMjIyJTIy");
    }

    #[test]
    fn encode_number_field_bare() {
        let cursor = Cursor::resume_after("1").with_field("ranking", 1111_u64);
        let token = QueryStringCodec.encode(&cursor);
        assert_eq!(token.as_str(), "YWZ0ZXI9JTIyMSUyMiZyYW5raW5nPTExMTE");
    }

    #[test]
    fn encode_boolean_field_bare() {
        let cursor = Cursor::resume_after("1").with_field("enabled", true);
        let token = QueryStringCodec.encode(&cursor);
        assert_eq!(token.as_str(), "YWZ0ZXI9JTIyMSUyMiZlbmFibGVkPXRydWU");
    }

    #[test]
    fn round_trip_preserves_scalar_types() {
        let cursor = Cursor::resume_after("abc-123")
            .with_field("ranking", 1111_u64)
            .with_field("enabled", true);
        let token = QueryStringCodec.encode(&cursor);
        assert_eq!(QueryStringCodec.try_decode(token.as_str()).unwrap(), cursor);
    }

    #[test]
    fn round_trip_survives_reserved_characters() {
        let cursor = Cursor::resume_after("a b&c=d?e%f").with_field("place", "café ☕");
        let token = QueryStringCodec.encode(&cursor);
        assert_eq!(QueryStringCodec.decode(token.as_str()), cursor);
    }

    #[test]
    fn decode_rehydrates_bare_number() {
        // payload "after=1" carries an unquoted value
        let cursor = QueryStringCodec.decode("YWZ0ZXI9MQ");
        assert_eq!(cursor.after(), Some(&CursorValue::Number(1.into())));
    }

    #[test]
    fn decode_empty_token_is_first_page() {
        assert!(QueryStringCodec.decode("").is_empty());
    }

    #[test]
    fn decode_garbage_is_first_page() {
        assert!(QueryStringCodec.decode("foobar").is_empty());
        assert!(QueryStringCodec.decode("!!!not-base64!!!").is_empty());
        assert!(QueryStringCodec.decode(&token_of("not json at all")).is_empty());
    }

    // Test critique: un curseur partiellement corrompu est rejeté en bloc
    // Jamais de position à moitié décodée
    #[test]
    fn partial_corruption_rejects_whole_cursor() {
        let token = token_of("after=%221%22&bad=nope");
        let cursor = QueryStringCodec.decode(&token);
        assert!(cursor.is_empty());
        assert!(cursor.after().is_none());
    }

    #[test]
    fn decode_rejects_non_scalar_values() {
        assert!(QueryStringCodec.decode(&token_of("after=[1,2]")).is_empty());
        assert!(QueryStringCodec
            .decode(&token_of("after=%7B%22a%22:1%7D"))
            .is_empty());
        assert!(QueryStringCodec.decode(&token_of("after=null")).is_empty());
    }

    #[test]
    fn duplicate_field_keeps_last_occurrence() {
        let cursor = QueryStringCodec.decode(&token_of("after=1&after=2"));
        assert_eq!(cursor.after(), Some(&CursorValue::Number(2.into())));
    }

    #[test]
    fn try_decode_reports_rejection_cause() {
        assert!(matches!(
            QueryStringCodec.try_decode("!!!"),
            Err(CursorDecodeError::Base64(_))
        ));
        assert!(matches!(
            QueryStringCodec.try_decode(&BASE64_URL_SAFE_NO_PAD.encode([0xff, 0xfe])),
            Err(CursorDecodeError::Utf8(_))
        ));
        assert!(matches!(
            QueryStringCodec.try_decode(&token_of("after=oops")),
            Err(CursorDecodeError::MalformedValue { field }) if field == "after"
        ));
        assert!(matches!(
            QueryStringCodec.try_decode(&token_of("sorting=[]")),
            Err(CursorDecodeError::NonScalarValue { field }) if field == "sorting"
        ));
    }

    #[test]
    fn encode_empty_cursor_is_empty_token() {
        let token = QueryStringCodec.encode(&Cursor::new());
        assert_eq!(token.as_str(), "");
        assert!(QueryStringCodec.decode(token.as_str()).is_empty());
    }
}
