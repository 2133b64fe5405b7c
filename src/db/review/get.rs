use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{
        Review, ReviewSubject,
        redis::RedisKey,
        review::ReactionState,
    },
    state::RedisClient,
};

pub(crate) fn parse_stored_review(raw: &str) -> Result<Review, AppError> {
    serde_json::from_str::<Review>(raw)
        .map(|review| review.with_reaction(ReactionState::Neutral))
        .map_err(|e| AppError::Deserialization(format!("Invalid review JSON: {e}")))
}

/// Record keys for the ids of a subject index, skipping ids that are not uuids.
fn review_keys(ids: &[String]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| match Uuid::parse_str(id) {
            Ok(uuid) => Some(RedisKey::review(uuid)),
            Err(_) => {
                tracing::warn!("Skipping invalid review id in index: {}", id);
                None
            }
        })
        .collect()
}

pub async fn get_review(
    review_id: Uuid,
    viewer_id: Option<Uuid>,
    redis: RedisClient,
) -> Result<Review, AppError> {
    let mut conn = redis.get().await?;

    let raw: Option<String> = conn
        .get(RedisKey::review(review_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let review = match raw {
        Some(raw) => parse_stored_review(&raw)?,
        None => return Err(AppError::NotFound(format!("Review {review_id} not found"))),
    };

    let Some(viewer_id) = viewer_id else {
        return Ok(review);
    };

    let stored: Option<String> = conn
        .hget(RedisKey::review_reactions(review_id), viewer_id.to_string())
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(review.with_reaction(ReactionState::from_stored(stored.as_deref())))
}

/// All reviews of one subject, oldest first.
pub async fn fetch_reviews(
    subject: ReviewSubject,
    viewer_id: Option<Uuid>,
    redis: RedisClient,
) -> Result<Vec<Review>, AppError> {
    let mut conn = redis.get().await?;

    let ids: Vec<String> = conn
        .zrange(RedisKey::subject_reviews(&subject), 0, -1)
        .await
        .map_err(AppError::RedisCommandError)?;

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let keys = review_keys(&ids);
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let raw_reviews: Vec<Option<String>> = redis::cmd("MGET")
        .arg(&keys)
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut reviews = Vec::with_capacity(raw_reviews.len());
    for (key, raw) in keys.iter().zip(raw_reviews) {
        let Some(raw) = raw else {
            tracing::warn!("Review index points at missing record {}", key);
            continue;
        };

        match parse_stored_review(&raw) {
            Ok(review) => reviews.push(review),
            Err(e) => tracing::warn!("Failed to deserialize review {}: {}", key, e),
        }
    }

    let Some(viewer_id) = viewer_id else {
        return Ok(reviews);
    };

    let mut pipe = redis::pipe();
    for review in &reviews {
        pipe.hget(RedisKey::review_reactions(review.id), viewer_id.to_string());
    }

    let states: Vec<Option<String>> = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(reviews
        .into_iter()
        .zip(states)
        .map(|(review, state)| review.with_reaction(ReactionState::from_stored(state.as_deref())))
        .collect())
}
