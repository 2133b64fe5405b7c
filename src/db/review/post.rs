use chrono::{DateTime, Utc};

use crate::{
    errors::AppError,
    models::{
        Review, ReviewSubject,
        redis::RedisKey,
        review::NewReview,
    },
    state::RedisClient,
};

/// Subject index score: creation time in microseconds.
///
/// Redis orders equal scores by member, so two reviews created in the same
/// microsecond come back in uuid order rather than insertion order.
pub(crate) fn index_score(created_at: DateTime<Utc>) -> i64 {
    created_at.timestamp_micros()
}

pub async fn create_review(
    subject: ReviewSubject,
    input: NewReview,
    redis: RedisClient,
) -> Result<Review, AppError> {
    let review = input.into_review(subject, Utc::now())?;

    let mut conn = redis.get().await?;

    let serialized =
        serde_json::to_string(&review).map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = redis::pipe()
        .atomic()
        .set(RedisKey::review(review.id), serialized)
        .ignore()
        .zadd(
            RedisKey::subject_reviews(&subject),
            review.id.to_string(),
            index_score(review.created_at),
        )
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::debug!(
        "Stored review {} for {:?} {}",
        review.id,
        subject.kind,
        subject.id
    );
    Ok(review)
}
