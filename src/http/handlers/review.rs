use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{
        create_review, delete_review, fetch_reviews, get_review, persist_reaction, update_review,
    },
    errors::AppError,
    models::{
        Review, ReviewSubject,
        pagination::{PaginatedResponse, paginate},
        review::{NewReview, Reaction, ReactionPayload, ReviewEdit, ReviewQuery, ViewerQuery},
    },
    reviews::{
        RatingLabel, ReviewStatsSummary, SubRatingAverages, apply, format_rating, rating_label,
        sub_rating_averages, summarize,
    },
    state::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummaryResponse {
    pub summary: ReviewStatsSummary,
    pub label: RatingLabel,
    pub average_text: String,
    pub sub_ratings: SubRatingAverages,
}

impl ReviewSummaryResponse {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let summary = summarize(reviews);
        Self {
            label: rating_label(summary.average_rating),
            average_text: format_rating(summary.average_rating),
            sub_ratings: sub_rating_averages(reviews),
            summary,
        }
    }
}

async fn list_reviews(
    subject: ReviewSubject,
    query: ReviewQuery,
    state: AppState,
) -> Result<Json<PaginatedResponse<Review>>, (StatusCode, String)> {
    let criteria = query.criteria().map_err(|e| {
        tracing::warn!("Rejected review query: {}", e);
        AppError::BadRequest(e.to_string()).to_response()
    })?;

    let reviews = fetch_reviews(subject, query.viewer_id, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error fetching reviews for {:?} {}: {}", subject.kind, subject.id, e);
            e.to_response()
        })?;

    let view = apply(&reviews, &criteria, query.sort_key());
    tracing::info!(
        "Listed {} of {} reviews for {:?} {}",
        view.len(),
        reviews.len(),
        subject.kind,
        subject.id
    );

    Ok(Json(paginate(view, query.page, query.limit)))
}

async fn review_summary(
    subject: ReviewSubject,
    state: AppState,
) -> Result<Json<ReviewSummaryResponse>, (StatusCode, String)> {
    let reviews = fetch_reviews(subject, None, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error fetching reviews for {:?} {}: {}", subject.kind, subject.id, e);
            e.to_response()
        })?;

    Ok(Json(ReviewSummaryResponse::from_reviews(&reviews)))
}

async fn add_review(
    subject: ReviewSubject,
    payload: NewReview,
    state: AppState,
) -> Result<Json<Review>, (StatusCode, String)> {
    let review = create_review(subject, payload, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error creating review: {}", e);
            e.to_response()
        })?;

    tracing::info!(
        "Review {} created for {:?} {}",
        review.id,
        subject.kind,
        subject.id
    );
    Ok(Json(review))
}

pub async fn get_product_reviews_handler(
    Path(product_id): Path<Uuid>,
    Query(query): Query<ReviewQuery>,
    State(state): State<AppState>,
) -> Result<Json<PaginatedResponse<Review>>, (StatusCode, String)> {
    list_reviews(ReviewSubject::product(product_id), query, state).await
}

pub async fn get_vendor_reviews_handler(
    Path(vendor_id): Path<Uuid>,
    Query(query): Query<ReviewQuery>,
    State(state): State<AppState>,
) -> Result<Json<PaginatedResponse<Review>>, (StatusCode, String)> {
    list_reviews(ReviewSubject::vendor(vendor_id), query, state).await
}

pub async fn get_product_summary_handler(
    Path(product_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ReviewSummaryResponse>, (StatusCode, String)> {
    review_summary(ReviewSubject::product(product_id), state).await
}

pub async fn get_vendor_summary_handler(
    Path(vendor_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ReviewSummaryResponse>, (StatusCode, String)> {
    review_summary(ReviewSubject::vendor(vendor_id), state).await
}

pub async fn create_product_review_handler(
    Path(product_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<NewReview>,
) -> Result<Json<Review>, (StatusCode, String)> {
    add_review(ReviewSubject::product(product_id), payload, state).await
}

pub async fn create_vendor_review_handler(
    Path(vendor_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<NewReview>,
) -> Result<Json<Review>, (StatusCode, String)> {
    add_review(ReviewSubject::vendor(vendor_id), payload, state).await
}

pub async fn get_review_handler(
    Path(review_id): Path<Uuid>,
    Query(query): Query<ViewerQuery>,
    State(state): State<AppState>,
) -> Result<Json<Review>, (StatusCode, String)> {
    let review = get_review(review_id, query.viewer_id, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving review {}: {}", review_id, e);
            e.to_response()
        })?;

    Ok(Json(review))
}

pub async fn update_review_handler(
    Path(review_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<ReviewEdit>,
) -> Result<Json<Review>, (StatusCode, String)> {
    let review = update_review(review_id, payload, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error updating review {}: {}", review_id, e);
            e.to_response()
        })?;

    tracing::info!("Review {} updated", review_id);
    Ok(Json(review))
}

pub async fn delete_review_handler(
    Path(review_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<&'static str>, (StatusCode, String)> {
    delete_review(review_id, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error deleting review {}: {}", review_id, e);
            e.to_response()
        })?;

    Ok(Json("success"))
}

async fn react(
    review_id: Uuid,
    payload: ReactionPayload,
    reaction: Reaction,
    state: AppState,
) -> Result<Json<Review>, (StatusCode, String)> {
    let review = persist_reaction(review_id, payload.viewer_id, reaction, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error applying {:?} to review {}: {}", reaction, review_id, e);
            e.to_response()
        })?;

    tracing::info!(
        "Review {} now has {} likes and {} dislikes",
        review_id,
        review.likes,
        review.dislikes
    );
    Ok(Json(review))
}

pub async fn like_review_handler(
    Path(review_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<ReactionPayload>,
) -> Result<Json<Review>, (StatusCode, String)> {
    react(review_id, payload, Reaction::Like, state).await
}

pub async fn dislike_review_handler(
    Path(review_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<ReactionPayload>,
) -> Result<Json<Review>, (StatusCode, String)> {
    react(review_id, payload, Reaction::Dislike, state).await
}
