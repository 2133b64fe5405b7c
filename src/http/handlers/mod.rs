pub mod review;

pub use review::{
    create_product_review_handler, create_vendor_review_handler, delete_review_handler,
    dislike_review_handler, get_product_reviews_handler, get_product_summary_handler,
    get_review_handler, get_vendor_reviews_handler, get_vendor_summary_handler,
    like_review_handler, update_review_handler,
};
