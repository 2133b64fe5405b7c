use std::str::FromStr;

use crate::{errors::ReviewError, models::Review};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    Exact(u8),
}

impl FromStr for RatingFilter {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(RatingFilter::All);
        }

        trimmed.parse::<u8>().map(RatingFilter::Exact).map_err(|_| {
            ReviewError::MalformedReview(format!("invalid rating filter '{trimmed}'"))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewCriteria {
    pub search_text: Option<String>,
    pub rating_filter: RatingFilter,
    pub require_images: bool,
    pub require_verified: bool,
}

impl ReviewCriteria {
    pub fn matches(&self, review: &Review) -> bool {
        if let Some(needle) = self.search_text.as_deref().filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            let hit = review.title.to_lowercase().contains(&needle)
                || review.comment.to_lowercase().contains(&needle)
                || review.user.name.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let RatingFilter::Exact(stars) = self.rating_filter {
            if review.rating != stars {
                return false;
            }
        }

        if self.require_images && review.images.is_empty() {
            return false;
        }

        if self.require_verified && !review.verified {
            return false;
        }

        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
    MostHelpful,
    /// Unrecognised key; keeps filtered order.
    Unsorted,
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        match value.trim() {
            "newest" => SortKey::Newest,
            "oldest" => SortKey::Oldest,
            "highest" => SortKey::Highest,
            "lowest" => SortKey::Lowest,
            "most_helpful" => SortKey::MostHelpful,
            other => {
                tracing::debug!("Unknown sort key '{}', keeping input order", other);
                SortKey::Unsorted
            }
        }
    }
}

/// Filter then sort into a new list. The input is left as is.
///
/// `Vec::sort_by` is stable, so reviews that compare equal keep the order
/// they had after filtering.
pub fn apply(reviews: &[Review], criteria: &ReviewCriteria, sort: SortKey) -> Vec<Review> {
    let mut view: Vec<Review> = reviews
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect();

    match sort {
        SortKey::Newest => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => view.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Highest => view.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortKey::Lowest => view.sort_by(|a, b| a.rating.cmp(&b.rating)),
        SortKey::MostHelpful => view.sort_by(|a, b| b.helpfulness().cmp(&a.helpfulness())),
        SortKey::Unsorted => {}
    }

    view
}
