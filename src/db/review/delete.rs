use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::review::get::parse_stored_review,
    errors::AppError,
    models::redis::RedisKey,
    state::RedisClient,
};

/// Moderation removal. The record, its reactions and its index entry go away
/// together; nothing is kept behind.
pub async fn delete_review(review_id: Uuid, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await?;

    let review_key = RedisKey::review(review_id);
    let raw: Option<String> = conn
        .get(&review_key)
        .await
        .map_err(AppError::RedisCommandError)?;

    let Some(raw) = raw else {
        return Err(AppError::NotFound(format!("Review {review_id} not found")));
    };
    let review = parse_stored_review(&raw)?;

    let _: () = redis::pipe()
        .atomic()
        .del(&review_key)
        .ignore()
        .del(RedisKey::review_reactions(review_id))
        .ignore()
        .zrem(RedisKey::subject_reviews(&review.subject), review_id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!("Deleted review {}", review_id);
    Ok(())
}
