//! Message repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{
    InboundMessage, Message, MessageDetail, NewMessage, OutboundMessage, ReadReceipt, UserSummary,
};

/// Message repository
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new message
    ///
    /// A recipient that does not exist violates the foreign key and
    /// surfaces as a store error; callers do not pre-validate it.
    pub async fn create(&self, from_username: &str, new_message: &NewMessage) -> Result<Message> {
        info!(
            "Creating message from {} to {}",
            from_username, new_message.to_username
        );

        let row = sqlx::query(
            r#"
            INSERT INTO messages (from_username, to_username, body, sent_at)
            VALUES ($1, $2, $3, current_timestamp)
            RETURNING id, from_username, to_username, body, sent_at
            "#,
        )
        .bind(from_username)
        .bind(&new_message.to_username)
        .bind(&new_message.body)
        .fetch_one(&self.pool)
        .await?;

        Ok(Message {
            id: row.get("id"),
            from_username: row.get("from_username"),
            to_username: row.get("to_username"),
            body: row.get("body"),
            sent_at: row.get("sent_at"),
        })
    }

    /// Fetch a message by id with both participants resolved
    pub async fn get(&self, id: i32) -> Result<Option<MessageDetail>> {
        let row = sqlx::query(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   f.username AS from_username, f.first_name AS from_first_name,
                   f.last_name AS from_last_name, f.phone AS from_phone,
                   t.username AS to_username, t.first_name AS to_first_name,
                   t.last_name AS to_last_name, t.phone AS to_phone
            FROM messages m
            JOIN users f ON m.from_username = f.username
            JOIN users t ON m.to_username = t.username
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| MessageDetail {
            id: row.get("id"),
            body: row.get("body"),
            sent_at: row.get("sent_at"),
            read_at: row.get("read_at"),
            from_user: UserSummary {
                username: row.get("from_username"),
                first_name: row.get("from_first_name"),
                last_name: row.get("from_last_name"),
                phone: row.get("from_phone"),
            },
            to_user: UserSummary {
                username: row.get("to_username"),
                first_name: row.get("to_first_name"),
                last_name: row.get("to_last_name"),
                phone: row.get("to_phone"),
            },
        }))
    }

    /// Set a message's read timestamp
    ///
    /// The COALESCE keeps the original timestamp, so read_at is written
    /// at most once no matter how often the recipient retries.
    pub async fn mark_read(&self, id: i32) -> Result<Option<ReadReceipt>> {
        let row = sqlx::query(
            r#"
            UPDATE messages
            SET read_at = COALESCE(read_at, current_timestamp)
            WHERE id = $1
            RETURNING id, read_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| ReadReceipt {
            id: row.get("id"),
            read_at: row.get("read_at"),
        }))
    }

    /// List messages addressed to a user, with each sender's summary
    pub async fn to_user(&self, username: &str) -> Result<Vec<InboundMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   f.username, f.first_name, f.last_name, f.phone
            FROM messages m
            JOIN users f ON m.from_username = f.username
            WHERE m.to_username = $1
            ORDER BY m.id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        let messages = rows
            .into_iter()
            .map(|row| InboundMessage {
                id: row.get("id"),
                body: row.get("body"),
                sent_at: row.get("sent_at"),
                read_at: row.get("read_at"),
                from_user: UserSummary {
                    username: row.get("username"),
                    first_name: row.get("first_name"),
                    last_name: row.get("last_name"),
                    phone: row.get("phone"),
                },
            })
            .collect();

        Ok(messages)
    }

    /// List messages sent by a user, with each recipient's summary
    pub async fn from_user(&self, username: &str) -> Result<Vec<OutboundMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   t.username, t.first_name, t.last_name, t.phone
            FROM messages m
            JOIN users t ON m.to_username = t.username
            WHERE m.from_username = $1
            ORDER BY m.id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        let messages = rows
            .into_iter()
            .map(|row| OutboundMessage {
                id: row.get("id"),
                body: row.get("body"),
                sent_at: row.get("sent_at"),
                read_at: row.get("read_at"),
                to_user: UserSummary {
                    username: row.get("username"),
                    first_name: row.get("first_name"),
                    last_name: row.get("last_name"),
                    phone: row.get("phone"),
                },
            })
            .collect();

        Ok(messages)
    }
}
