//! Review aggregation, filtering and reactions.
//!
//! Everything here is synchronous and works on in-memory records; callers own
//! persistence and decide when to recompute.

pub mod aggregate;
pub mod filter;
pub mod reaction;

pub use aggregate::{
    RatingBucket, RatingLabel, ReviewStatsSummary, SubRatingAverages, format_rating,
    rating_label, sub_rating_averages, summarize,
};
pub use filter::{RatingFilter, ReviewCriteria, SortKey, apply};
pub use reaction::{apply_reaction, toggle_dislike, toggle_like};
