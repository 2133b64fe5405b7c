use bb8::PooledConnection;
use bb8_redis::RedisConnectionManager;
use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::review::get::parse_stored_review,
    errors::AppError,
    models::{
        Review,
        redis::RedisKey,
        review::{Reaction, ReactionState, ReviewEdit},
    },
    reviews::apply_reaction,
    state::RedisClient,
};

const MAX_TX_RETRIES: usize = 5;

type RedisConn<'a> = PooledConnection<'a, RedisConnectionManager>;

async fn unwatch(conn: &mut RedisConn<'_>) {
    let result: Result<(), _> = redis::cmd("UNWATCH").query_async(&mut **conn).await;
    if let Err(e) = result {
        tracing::warn!("Failed to UNWATCH review keys: {}", e);
    }
}

/// Read the record (and the viewer's reaction, if any) under WATCH.
async fn load_watched(
    conn: &mut RedisConn<'_>,
    review_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<Review, AppError> {
    let review_key = RedisKey::review(review_id);
    let reactions_key = RedisKey::review_reactions(review_id);

    let _: () = redis::cmd("WATCH")
        .arg(&review_key)
        .arg(&reactions_key)
        .query_async(&mut **conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let raw: Option<String> = conn
        .get(&review_key)
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
        .hget(&reactions_key, viewer_id.to_string())
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(review.with_reaction(ReactionState::from_stored(stored.as_deref())))
}

/// Stored JSON never carries a viewer's reaction; that lives in the
/// reactions hash.
fn stage_write(updated: &Review) -> Result<(String, ReactionState), AppError> {
    let viewer_state = updated.reaction_state()?;
    let stored = updated.clone().with_reaction(ReactionState::Neutral);
    let serialized =
        serde_json::to_string(&stored).map_err(|e| AppError::Serialization(e.to_string()))?;
    Ok((serialized, viewer_state))
}

/// Optimistic read-modify-write of one review.
///
/// Concurrent writers on the same record abort the EXEC; the whole cycle is
/// then retried against fresh state.
async fn modify_review<F>(
    review_id: Uuid,
    viewer_id: Option<Uuid>,
    redis: RedisClient,
    mut modify: F,
) -> Result<Review, AppError>
where
    F: FnMut(&Review) -> Result<Review, AppError>,
{
    let mut conn = redis.get().await?;
    let review_key = RedisKey::review(review_id);
    let reactions_key = RedisKey::review_reactions(review_id);

    for attempt in 1..=MAX_TX_RETRIES {
        let staged = match load_watched(&mut conn, review_id, viewer_id).await {
            Ok(current) => modify(&current),
            Err(e) => Err(e),
        };

        let updated = match staged {
            Ok(updated) => updated,
            Err(e) => {
                unwatch(&mut conn).await;
                return Err(e);
            }
        };

        let (serialized, viewer_state) = match stage_write(&updated) {
            Ok(staged) => staged,
            Err(e) => {
                unwatch(&mut conn).await;
                return Err(e);
            }
        };

        let mut pipe = redis::pipe();
        pipe.atomic().set(&review_key, serialized).ignore();

        if let Some(viewer_id) = viewer_id {
            let field = viewer_id.to_string();
            match viewer_state.as_stored() {
                Some(value) => pipe.hset(&reactions_key, field, value).ignore(),
                None => pipe.hdel(&reactions_key, field).ignore(),
            };
        }

        let committed: Option<()> = pipe
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;

        if committed.is_some() {
            return Ok(updated);
        }

        tracing::warn!(
            "Review {} changed during update, retrying (attempt {}/{})",
            review_id,
            attempt,
            MAX_TX_RETRIES
        );
    }

    Err(AppError::Conflict(format!(
        "Review {review_id} is being updated concurrently, try again"
    )))
}

/// Toggle one viewer's like or dislike and persist counters and viewer state
/// in a single transaction.
pub async fn persist_reaction(
    review_id: Uuid,
    viewer_id: Uuid,
    reaction: Reaction,
    redis: RedisClient,
) -> Result<Review, AppError> {
    let review = modify_review(review_id, Some(viewer_id), redis, |current| {
        apply_reaction(current, reaction).map_err(AppError::from)
    })
    .await?;

    tracing::debug!(
        "Viewer {} applied {:?} to review {} (likes={}, dislikes={})",
        viewer_id,
        reaction,
        review_id,
        review.likes,
        review.dislikes
    );
    Ok(review)
}

pub async fn update_review(
    review_id: Uuid,
    edit: ReviewEdit,
    redis: RedisClient,
) -> Result<Review, AppError> {
    edit.validate()?;

    let review = modify_review(review_id, None, redis, |current| {
        edit.clone()
            .apply_to(current, Utc::now())
            .map_err(AppError::from)
    })
    .await?;

    tracing::debug!("Updated review {}", review_id);
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::ReviewError,
        models::{ReviewAuthor, ReviewSubject},
        reviews::toggle_like,
    };
    use chrono::TimeZone;

    fn stored_review() -> Review {
        let created = Utc
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .expect("valid test date");

        Review {
            id: Uuid::new_v4(),
            user: ReviewAuthor {
                id: Uuid::new_v4(),
                name: "Ben".into(),
                avatar_url: None,
            },
            rating: 3,
            title: "Okay".into(),
            comment: "Runs small".into(),
            images: Vec::new(),
            subject: ReviewSubject::vendor(Uuid::nil()),
            likes: 2,
            dislikes: 0,
            liked: false,
            disliked: false,
            recommend: false,
            verified: true,
            delivery_rating: Some(4),
            communication_rating: None,
            value_rating: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_liked_review_is_stored_neutral() {
        let liked = toggle_like(&stored_review()).unwrap();

        let (json, viewer_state) = stage_write(&liked).unwrap();
        assert_eq!(viewer_state, ReactionState::Liked);
        assert!(json.contains("\"liked\":false"));
        assert!(json.contains("\"disliked\":false"));
        assert!(json.contains("\"likes\":3"));

        // What goes back into Redis parses to the same counters.
        let reloaded = parse_stored_review(&json).unwrap();
        assert_eq!(reloaded.likes, 3);
        assert_eq!(reloaded.reaction_state(), Ok(ReactionState::Neutral));
    }

    #[test]
    fn test_corrupt_reaction_is_not_written() {
        let mut corrupt = stored_review();
        corrupt.liked = true;
        corrupt.disliked = true;

        let result = stage_write(&corrupt);
        assert!(matches!(
            result,
            Err(AppError::Review(ReviewError::InvariantViolation { review_id })) if review_id == corrupt.id
        ));
    }
}
