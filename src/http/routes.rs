use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    http::handlers::{
        create_product_review_handler, create_vendor_review_handler, delete_review_handler,
        dislike_review_handler, get_product_reviews_handler, get_product_summary_handler,
        get_review_handler, get_vendor_reviews_handler, get_vendor_summary_handler,
        like_review_handler, update_review_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/products/{product_id}/reviews",
            get(get_product_reviews_handler).post(create_product_review_handler),
        )
        .route(
            "/products/{product_id}/reviews/summary",
            get(get_product_summary_handler),
        )
        .route(
            "/vendors/{vendor_id}/reviews",
            get(get_vendor_reviews_handler).post(create_vendor_review_handler),
        )
        .route(
            "/vendors/{vendor_id}/reviews/summary",
            get(get_vendor_summary_handler),
        )
        .route(
            "/reviews/{review_id}",
            get(get_review_handler)
                .put(update_review_handler)
                .delete(delete_review_handler),
        )
        .route("/reviews/{review_id}/like", post(like_review_handler))
        .route("/reviews/{review_id}/dislike", post(dislike_review_handler))
        .with_state(state)
}
