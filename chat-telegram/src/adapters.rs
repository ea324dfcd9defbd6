//! Adapters from Telegram (teloxide) types to chat_core types.
//! Depends only on teloxide and chat_core type definitions.

use chat_core::{Session, User};

/// Converts a teloxide User to the core [`User`].
pub fn user_from_telegram(user: &teloxide::types::User) -> User {
    User {
        id: user.id.0 as i64,
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
    }
}

/// Builds the session identity for the chat a message arrived in.
pub fn session_from_message(msg: &teloxide::types::Message) -> Session {
    Session::new(msg.chat.id.0, msg.from.as_ref().map(user_from_telegram))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: teloxide User converts to core User with correct id, username, names.**
    #[test]
    fn test_user_from_telegram() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = user_from_telegram(&user);

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }
}
