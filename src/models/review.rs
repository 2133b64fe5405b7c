use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::ReviewError,
    reviews::{RatingFilter, ReviewCriteria, SortKey},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAuthor {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Product,
    Vendor,
}

/// What a review is about. Exactly one of product or vendor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubject {
    pub kind: SubjectKind,
    pub id: Uuid,
}

impl ReviewSubject {
    pub fn product(id: Uuid) -> Self {
        Self {
            kind: SubjectKind::Product,
            id,
        }
    }

    pub fn vendor(id: Uuid) -> Self {
        Self {
            kind: SubjectKind::Vendor,
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub user: ReviewAuthor,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub subject: ReviewSubject,

    pub likes: u32,
    pub dislikes: u32,
    /// Reaction of the viewer the record was loaded for.
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub disliked: bool,

    pub recommend: bool,
    pub verified: bool,

    pub delivery_rating: Option<u8>,
    pub communication_rating: Option<u8>,
    pub value_rating: Option<u8>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReactionState {
    Neutral,
    Liked,
    Disliked,
}

impl ReactionState {
    /// Value stored in the per-review reactions hash, `None` for neutral.
    pub fn as_stored(&self) -> Option<&'static str> {
        match self {
            ReactionState::Neutral => None,
            ReactionState::Liked => Some("like"),
            ReactionState::Disliked => Some("dislike"),
        }
    }

    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("like") => ReactionState::Liked,
            Some("dislike") => ReactionState::Disliked,
            Some(other) => {
                tracing::warn!("Unknown stored reaction '{}', treating as neutral", other);
                ReactionState::Neutral
            }
            None => ReactionState::Neutral,
        }
    }
}

impl Review {
    pub fn reaction_state(&self) -> Result<ReactionState, ReviewError> {
        match (self.liked, self.disliked) {
            (false, false) => Ok(ReactionState::Neutral),
            (true, false) => Ok(ReactionState::Liked),
            (false, true) => Ok(ReactionState::Disliked),
            (true, true) => Err(ReviewError::InvariantViolation { review_id: self.id }),
        }
    }

    /// Project a viewer's reaction onto the record without touching counters.
    pub fn with_reaction(mut self, state: ReactionState) -> Self {
        self.liked = state == ReactionState::Liked;
        self.disliked = state == ReactionState::Disliked;
        self
    }

    /// Net helpfulness score; negative when dislikes outnumber likes.
    pub fn helpfulness(&self) -> i64 {
        i64::from(self.likes) - i64::from(self.dislikes)
    }
}

fn validate_rating(rating: u8) -> Result<(), ReviewError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ReviewError::MalformedReview(format!(
            "rating must be between 1 and 5, got {rating}"
        )))
    }
}

fn validate_sub_rating(name: &str, rating: Option<u8>) -> Result<(), ReviewError> {
    match rating {
        Some(r) if r > 5 => Err(ReviewError::MalformedReview(format!(
            "{name} must be between 1 and 5, got {r}"
        ))),
        _ => Ok(()),
    }
}

fn validate_images(images: &[String]) -> Result<(), ReviewError> {
    if images.iter().any(|url| url.trim().is_empty()) {
        return Err(ReviewError::MalformedReview(
            "image URLs must not be empty".into(),
        ));
    }
    Ok(())
}

// 0 means "not rated" on the wire.
fn normalize_sub_rating(rating: Option<u8>) -> Option<u8> {
    rating.filter(|r| *r > 0)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub user: ReviewAuthor,
    pub rating: u8,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub recommend: bool,
    #[serde(default)]
    pub verified: bool,
    pub delivery_rating: Option<u8>,
    pub communication_rating: Option<u8>,
    pub value_rating: Option<u8>,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), ReviewError> {
        validate_rating(self.rating)?;
        validate_sub_rating("deliveryRating", self.delivery_rating)?;
        validate_sub_rating("communicationRating", self.communication_rating)?;
        validate_sub_rating("valueRating", self.value_rating)?;
        validate_images(&self.images)
    }

    /// Build a fresh record with neutral reaction state and zero counters.
    pub fn into_review(
        self,
        subject: ReviewSubject,
        now: DateTime<Utc>,
    ) -> Result<Review, ReviewError> {
        self.validate()?;

        Ok(Review {
            id: Uuid::new_v4(),
            user: self.user,
            rating: self.rating,
            title: self.title,
            comment: self.comment,
            images: self.images,
            subject,
            likes: 0,
            dislikes: 0,
            liked: false,
            disliked: false,
            recommend: self.recommend,
            verified: self.verified,
            delivery_rating: normalize_sub_rating(self.delivery_rating),
            communication_rating: normalize_sub_rating(self.communication_rating),
            value_rating: normalize_sub_rating(self.value_rating),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Author edit. Replaces content wholesale; reaction counters, identity and
/// provenance are carried over from the stored record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEdit {
    pub rating: u8,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub recommend: bool,
    pub delivery_rating: Option<u8>,
    pub communication_rating: Option<u8>,
    pub value_rating: Option<u8>,
}

impl ReviewEdit {
    pub fn validate(&self) -> Result<(), ReviewError> {
        validate_rating(self.rating)?;
        validate_sub_rating("deliveryRating", self.delivery_rating)?;
        validate_sub_rating("communicationRating", self.communication_rating)?;
        validate_sub_rating("valueRating", self.value_rating)?;
        validate_images(&self.images)
    }

    pub fn apply_to(self, review: &Review, now: DateTime<Utc>) -> Result<Review, ReviewError> {
        self.validate()?;

        Ok(Review {
            rating: self.rating,
            title: self.title,
            comment: self.comment,
            images: self.images,
            recommend: self.recommend,
            delivery_rating: normalize_sub_rating(self.delivery_rating),
            communication_rating: normalize_sub_rating(self.communication_rating),
            value_rating: normalize_sub_rating(self.value_rating),
            updated_at: now,
            ..review.clone()
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionPayload {
    pub viewer_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    pub viewer_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewQuery {
    pub search: Option<String>,
    pub rating: Option<String>,
    pub images: Option<bool>,
    pub verified: Option<bool>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub viewer_id: Option<Uuid>,
}

impl ReviewQuery {
    pub fn criteria(&self) -> Result<ReviewCriteria, ReviewError> {
        let rating_filter = match self.rating.as_deref() {
            Some(raw) => raw.parse::<RatingFilter>()?,
            None => RatingFilter::All,
        };

        Ok(ReviewCriteria {
            search_text: self.search.clone(),
            rating_filter,
            require_images: self.images.unwrap_or(false),
            require_verified: self.verified.unwrap_or(false),
        })
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
            .as_deref()
            .map(SortKey::from)
            .unwrap_or_default()
    }
}
