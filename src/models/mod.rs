pub mod pagination;
pub mod redis;
pub mod review;

pub use review::{Review, ReviewAuthor, ReviewSubject};
