use uuid::Uuid;

use crate::models::review::{ReviewSubject, SubjectKind};

pub struct RedisKey;

impl RedisKey {
    pub fn review(review_id: Uuid) -> String {
        format!("review:{review_id}")
    }

    pub fn review_reactions(review_id: Uuid) -> String {
        format!("review:{review_id}:reactions")
    }

    /// Sorted set of review ids for one subject, scored by creation time.
    pub fn subject_reviews(subject: &ReviewSubject) -> String {
        match subject.kind {
            SubjectKind::Product => format!("product:{}:reviews", subject.id),
            SubjectKind::Vendor => format!("vendor:{}:reviews", subject.id),
        }
    }
}
