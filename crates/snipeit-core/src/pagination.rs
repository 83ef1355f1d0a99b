// Page-token codec
//
// Tokens are JSON cursors `{"resource_type_id": "...", "offset": N}`. The
// resource type is the one being paged upstream, which for group grants and
// role entitlements is `user` rather than the resource's own type.

use serde::{Deserialize, Serialize};

use crate::error::ConnectorError;
use crate::model::PageToken;

/// Page size used against every paginated endpoint.
pub const RESOURCE_PAGE_SIZE: u64 = 50;

#[derive(Debug, Serialize, Deserialize)]
struct Cursor {
    resource_type_id: String,
    offset: u64,
}

/// Offset encoded in `token`. The empty token is offset 0.
pub fn decode(token: &PageToken, resource_type_id: &str) -> Result<u64, ConnectorError> {
    if token.is_empty() {
        return Ok(0);
    }

    let cursor: Cursor = serde_json::from_str(token.as_str())?;
    if cursor.resource_type_id != resource_type_id {
        return Err(ConnectorError::PageTokenMismatch {
            expected: resource_type_id.to_owned(),
            found: cursor.resource_type_id,
        });
    }
    Ok(cursor.offset)
}

/// Token pointing at `offset`.
pub fn next_page(resource_type_id: &str, offset: u64) -> Result<PageToken, ConnectorError> {
    let cursor = Cursor {
        resource_type_id: resource_type_id.to_owned(),
        offset,
    };
    Ok(PageToken::new(serde_json::to_string(&cursor)?))
}

/// A short page means the listing is exhausted.
pub fn is_last_page(count: usize, page_size: u64) -> bool {
    u64::try_from(count).is_ok_and(|count| count < page_size)
}

/// Token following a page of `count` rows fetched at `offset`.
///
/// `offset` comes from a caller-supplied token, so advancing past
/// `u64::MAX` is an error rather than a wrap.
pub(crate) fn after_page(
    resource_type_id: &str,
    offset: u64,
    count: usize,
) -> Result<PageToken, ConnectorError> {
    if is_last_page(count, RESOURCE_PAGE_SIZE) {
        return Ok(PageToken::empty());
    }

    let next = offset
        .checked_add(RESOURCE_PAGE_SIZE)
        .ok_or(ConnectorError::PageOffsetOverflow { offset })?;
    next_page(resource_type_id, next)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_starts_at_zero() {
        assert_eq!(decode(&PageToken::empty(), "user").unwrap(), 0);
    }

    #[test]
    fn encoded_offset_decodes() {
        let token = next_page("user", 100).unwrap();
        assert_eq!(
            token.as_str(),
            r#"{"resource_type_id":"user","offset":100}"#
        );
        assert_eq!(decode(&token, "user").unwrap(), 100);
    }

    #[test]
    fn malformed_token_is_an_error() {
        let err = decode(&PageToken::from("not-json"), "user").unwrap_err();
        assert!(matches!(err, ConnectorError::PageToken(_)));
    }

    #[test]
    fn token_for_another_type_is_rejected() {
        let token = next_page("group", 50).unwrap();
        assert!(matches!(
            decode(&token, "user"),
            Err(ConnectorError::PageTokenMismatch { .. })
        ));
    }

    #[test]
    fn full_page_continues_short_page_stops() {
        assert!(!after_page("user", 0, 50).unwrap().is_empty());
        assert!(after_page("user", 0, 49).unwrap().is_empty());
        assert!(after_page("user", 50, 0).unwrap().is_empty());
        assert!(is_last_page(0, RESOURCE_PAGE_SIZE));
    }

    #[test]
    fn offset_near_max_does_not_wrap() {
        let offset = u64::MAX - 10;
        assert!(matches!(
            after_page("user", offset, 50),
            Err(ConnectorError::PageOffsetOverflow { offset: o }) if o == offset
        ));

        // A short page ends the listing without advancing.
        assert!(after_page("user", offset, 3).unwrap().is_empty());
        assert!(!after_page("user", u64::MAX - RESOURCE_PAGE_SIZE, 50).unwrap().is_empty());
    }
}
