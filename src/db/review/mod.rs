pub mod delete;
pub mod get;
pub mod patch;
pub mod post;

pub use delete::delete_review;
pub use get::{fetch_reviews, get_review};
pub use patch::{persist_reaction, update_review};
pub use post::create_review;
