#![allow(clippy::module_name_repetitions)]
use uuid::Uuid;

use crate::{error::AppError, storage::db::SurrealDbClient, stored_object};

#[derive(Deserialize, Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    AI,
}

stored_object!(ChatMessage, "chat_message", {
    text: String,
    role: MessageRole,
    user_id: String
});

impl ChatMessage {
    pub fn new(text: String, role: MessageRole, user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            text,
            role,
            user_id,
        }
    }

    /// The owning user's messages in conversation order, oldest first.
    pub async fn get_user_history(
        user_id: &str,
        db: &SurrealDbClient,
    ) -> Result<Vec<Self>, AppError> {
        let messages: Vec<ChatMessage> = db
            .client
            .query(
                "SELECT * FROM type::table($table_name) WHERE user_id = $user_id
                ORDER BY created_at ASC",
            )
            .bind(("table_name", ChatMessage::table_name()))
            .bind(("user_id", user_id.to_owned()))
            .await?
            .take(0)?;

        Ok(messages)
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::AI => write!(f, "ai"),
        }
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.text)
    }
}
