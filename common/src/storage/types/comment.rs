use uuid::Uuid;

use crate::{error::AppError, storage::db::SurrealDbClient, stored_object};

stored_object!(Comment, "comment", {
    text: String,
    author_name: String,
    author_email: String,
    user_id: String,
    liked_by: Vec<String>
});

impl Comment {
    pub fn new(text: String, author_name: String, author_email: String, user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            text,
            author_name,
            author_email,
            user_id,
            liked_by: Vec::new(),
        }
    }

    /// All comments, newest first.
    pub async fn get_recent(db: &SurrealDbClient) -> Result<Vec<Self>, AppError> {
        let comments: Vec<Comment> = db
            .client
            .query("SELECT * FROM type::table($table_name) ORDER BY created_at DESC")
            .bind(("table_name", Comment::table_name()))
            .await?
            .take(0)?;

        Ok(comments)
    }

    /// Toggle `user_id`'s membership in the liking set in a single UPDATE.
    ///
    /// The set semantics (each user present at most once) are enforced by the
    /// database's `array::union` / `array::difference`, not by application
    /// logic.
    pub async fn toggle_like(
        id: &str,
        user_id: &str,
        db: &SurrealDbClient,
    ) -> Result<Self, AppError> {
        let comment: Option<Comment> = db
            .client
            .query(
                "UPDATE type::thing('comment', $id) SET
                liked_by = IF $user_id IN liked_by
                    THEN array::difference(liked_by, [$user_id])
                    ELSE array::union(liked_by, [$user_id])
                END,
                updated_at = $updated_at
                RETURN AFTER",
            )
            .bind(("id", id.to_owned()))
            .bind(("user_id", user_id.to_owned()))
            .bind(("updated_at", surrealdb::sql::Datetime::from(Utc::now())))
            .await?
            .take(0)?;

        comment.ok_or_else(|| AppError::NotFound("Comment not found".into()))
    }
}
