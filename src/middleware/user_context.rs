// ABOUTME: Caller identity extraction from the gateway-provided user header
// ABOUTME: Rejects requests without a positive integer user id with AUTH_REQUIRED
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use crate::constants::headers::USER_ID;
use crate::errors::{AppError, AppResult};
use crate::models::UserId;
use axum::http::HeaderMap;

/// Read the caller's user id from the `X-User-Id` header
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when the header is missing, not valid UTF-8, or not
/// a positive integer
pub fn require_user(headers: &HeaderMap) -> AppResult<UserId> {
    headers
        .get(USER_ID)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<UserId>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(AppError::auth_required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use axum::http::HeaderValue;

    #[test]
    fn test_valid_header_yields_user() {
        let mut map = HeaderMap::new();
        map.insert(USER_ID, HeaderValue::from_static(" 42 "));
        assert_eq!(require_user(&map).unwrap(), 42);
    }

    #[test]
    fn test_missing_or_invalid_header_is_rejected() {
        assert_eq!(
            require_user(&HeaderMap::new()).unwrap_err().code,
            ErrorCode::AuthRequired
        );
        for bad in ["abc", "0", "-3"] {
            let mut map = HeaderMap::new();
            map.insert(USER_ID, HeaderValue::from_static(bad));
            assert!(require_user(&map).is_err());
        }
    }
}
