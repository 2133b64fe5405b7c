pub mod review;

pub use review::{
    create_review, delete_review, fetch_reviews, get_review, persist_reaction, update_review,
};
