use chrono::{DateTime, Utc};

use crate::{
    errors::ReviewError,
    models::review::{Reaction, ReactionState, Review},
};

pub fn toggle_like(review: &Review) -> Result<Review, ReviewError> {
    toggle_like_at(review, Utc::now())
}

pub fn toggle_dislike(review: &Review) -> Result<Review, ReviewError> {
    toggle_dislike_at(review, Utc::now())
}

pub fn apply_reaction(review: &Review, reaction: Reaction) -> Result<Review, ReviewError> {
    match reaction {
        Reaction::Like => toggle_like(review),
        Reaction::Dislike => toggle_dislike(review),
    }
}

/// Like toggle with an explicit clock.
///
/// liked -> neutral, neutral -> liked, disliked -> liked. Switching from a
/// dislike releases the dislike in the same step.
pub fn toggle_like_at(review: &Review, now: DateTime<Utc>) -> Result<Review, ReviewError> {
    let mut next = review.clone();

    match review.reaction_state()? {
        ReactionState::Liked => {
            next.liked = false;
            next.likes = next.likes.saturating_sub(1);
        }
        ReactionState::Neutral => {
            next.liked = true;
            next.likes = next.likes.saturating_add(1);
        }
        ReactionState::Disliked => {
            next.liked = true;
            next.likes = next.likes.saturating_add(1);
            next.disliked = false;
            next.dislikes = next.dislikes.saturating_sub(1);
        }
    }

    next.updated_at = now;
    Ok(next)
}

/// Mirror image of [`toggle_like_at`].
pub fn toggle_dislike_at(review: &Review, now: DateTime<Utc>) -> Result<Review, ReviewError> {
    let mut next = review.clone();

    match review.reaction_state()? {
        ReactionState::Disliked => {
            next.disliked = false;
            next.dislikes = next.dislikes.saturating_sub(1);
        }
        ReactionState::Neutral => {
            next.disliked = true;
            next.dislikes = next.dislikes.saturating_add(1);
        }
        ReactionState::Liked => {
            next.disliked = true;
            next.dislikes = next.dislikes.saturating_add(1);
            next.liked = false;
            next.likes = next.likes.saturating_sub(1);
        }
    }

    next.updated_at = now;
    Ok(next)
}
