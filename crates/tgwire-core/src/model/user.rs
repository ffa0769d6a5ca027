//! Users and the bot identity.

use std::ops::Deref;

use crate::entity::Entity;
use crate::error::MappingResult;
use crate::mapping::FieldSet;
use crate::value::Param;

/// A Telegram user or bot account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    /// Unique identifier.
    pub id: i64,
    /// Whether this user is a bot.
    pub is_bot: bool,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: Option<String>,
    /// Username, without the leading `@`.
    pub username: Option<String>,
    /// IETF language tag of the user's client.
    pub language_code: Option<String>,
}

impl User {
    /// Creates a user with only the required fields set.
    pub fn new(id: i64, is_bot: bool, first_name: impl Into<String>) -> Self {
        Self {
            id,
            is_bot,
            first_name: first_name.into(),
            last_name: None,
            username: None,
            language_code: None,
        }
    }
}

impl Entity for User {
    const NAME: &'static str = "User";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        Ok(Self {
            id: fields.required("id")?,
            is_bot: fields.required("is_bot")?,
            first_name: fields.required("first_name")?,
            last_name: fields.optional("last_name")?,
            username: fields.optional("username")?,
            language_code: fields.optional("language_code")?,
        })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("id", self.id.into()),
            ("is_bot", self.is_bot.into()),
            ("first_name", self.first_name.clone().into()),
            ("last_name", self.last_name.clone().into()),
            ("username", self.username.clone().into()),
            ("language_code", self.language_code.clone().into()),
        ]
    }
}

/// The bot's own account together with its access token.
///
/// Immutable once constructed. The token never appears in `Debug` output
/// nor among the outbound fields.
#[derive(Clone, PartialEq, Eq)]
pub struct Bot {
    user: User,
    api_token: String,
}

impl Bot {
    /// Pairs an account with its access token.
    pub fn new(user: User, api_token: impl Into<String>) -> Self {
        Self {
            user,
            api_token: api_token.into(),
        }
    }

    /// The access token.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// The underlying account.
    pub fn user(&self) -> &User {
        &self.user
    }
}

impl Deref for Bot {
    type Target = User;

    fn deref(&self) -> &User {
        &self.user
    }
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl Entity for Bot {
    const NAME: &'static str = "Bot";

    fn build(fields: &mut FieldSet) -> MappingResult<Self> {
        let user = User::build(fields)?;
        let api_token = fields.required("api_token")?;
        Ok(Self { user, api_token })
    }

    fn fields(&self) -> Vec<(&'static str, Param)> {
        self.user.fields()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use super::*;
    use crate::mapping::convert_with;

    #[test]
    fn test_bot_from_get_me_with_token() {
        let mut extra = Map::new();
        extra.insert("api_token".into(), json!("123:abc"));
        let bot: Bot = convert_with(
            json!({"id": 99, "is_bot": true, "first_name": "Helper", "username": "helper_bot"}),
            extra,
        )
        .unwrap();
        assert_eq!(bot.id, 99);
        assert_eq!(bot.api_token(), "123:abc");
        assert_eq!(bot.username.as_deref(), Some("helper_bot"));
    }

    #[test]
    fn test_bot_debug_hides_token() {
        let bot = Bot::new(User::new(1, true, "Helper"), "secret-token");
        assert!(!format!("{bot:?}").contains("secret-token"));
    }

    #[test]
    fn test_bot_fields_exclude_token() {
        let bot = Bot::new(User::new(1, true, "Helper"), "secret-token");
        assert!(bot.fields().iter().all(|(name, _)| *name != "api_token"));
    }
}
