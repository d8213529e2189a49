//! Ownership checks shared by the user and message routes
//!
//! All three checks are plain equality against the verified identity.
//! `require_same_user` never consults the store, so a request for a
//! non-existent username is indistinguishable from a mismatch.

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::MessageDetail;

/// Allow only the user named in the path
pub fn require_same_user(identity: &AuthUser, username: &str) -> ApiResult<()> {
    if identity.username == username {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Allow only the sender or the recipient of a message
pub fn require_participant(identity: &AuthUser, message: &MessageDetail) -> ApiResult<()> {
    if identity.username == message.from_user.username
        || identity.username == message.to_user.username
    {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Allow only the recipient of a message
pub fn require_recipient(identity: &AuthUser, message: &MessageDetail) -> ApiResult<()> {
    if identity.username == message.to_user.username {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserSummary;
    use chrono::Utc;

    fn summary(username: &str) -> UserSummary {
        UserSummary {
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "Testy".to_string(),
            phone: "+14155550000".to_string(),
        }
    }

    fn message(from: &str, to: &str) -> MessageDetail {
        MessageDetail {
            id: 1,
            body: "hello".to_string(),
            sent_at: Utc::now(),
            read_at: None,
            from_user: summary(from),
            to_user: summary(to),
        }
    }

    fn identity(username: &str) -> AuthUser {
        AuthUser {
            username: username.to_string(),
        }
    }

    #[test]
    fn test_same_user_allows_match() {
        assert!(require_same_user(&identity("test1"), "test1").is_ok());
    }

    #[test]
    fn test_same_user_rejects_mismatch() {
        assert!(matches!(
            require_same_user(&identity("test1"), "test2"),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_same_user_rejects_unknown_username_identically() {
        // A username that exists nowhere gets the same answer as a mismatch
        assert!(matches!(
            require_same_user(&identity("test1"), "imfake"),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_participant_allows_sender_and_recipient() {
        let msg = message("test1", "test2");
        assert!(require_participant(&identity("test1"), &msg).is_ok());
        assert!(require_participant(&identity("test2"), &msg).is_ok());
    }

    #[test]
    fn test_participant_rejects_third_party() {
        let msg = message("test1", "test2");
        assert!(matches!(
            require_participant(&identity("test3"), &msg),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_recipient_rejects_sender() {
        let msg = message("test1", "test2");
        assert!(require_recipient(&identity("test2"), &msg).is_ok());
        assert!(matches!(
            require_recipient(&identity("test1"), &msg),
            Err(ApiError::Unauthorized)
        ));
    }
}
