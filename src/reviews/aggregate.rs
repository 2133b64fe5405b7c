use serde::Serialize;

use crate::models::Review;

/// Star values in display order.
pub const STAR_ORDER: [u8; 5] = [5, 4, 3, 2, 1];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingBucket {
    pub stars: u8,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatsSummary {
    pub total_count: usize,
    /// Full precision; rounding belongs to whoever renders it.
    pub average_rating: f64,
    pub distribution: Vec<RatingBucket>,
    pub recommend_count: usize,
    pub recommend_percentage: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubRatingAverages {
    pub delivery: Option<f64>,
    pub communication: Option<f64>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RatingLabel {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
    Poor,
}

impl RatingLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingLabel::Excellent => "Excellent",
            RatingLabel::VeryGood => "Very Good",
            RatingLabel::Good => "Good",
            RatingLabel::Average => "Average",
            RatingLabel::BelowAverage => "Below Average",
            RatingLabel::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

pub fn summarize(reviews: &[Review]) -> ReviewStatsSummary {
    let total_count = reviews.len();

    let average_rating = if total_count == 0 {
        0.0
    } else {
        let sum: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
        sum as f64 / total_count as f64
    };

    let distribution = STAR_ORDER
        .iter()
        .map(|&stars| {
            let count = reviews.iter().filter(|r| r.rating == stars).count();
            RatingBucket {
                stars,
                count,
                percentage: percentage(count, total_count),
            }
        })
        .collect();

    let recommend_count = reviews.iter().filter(|r| r.recommend).count();

    ReviewStatsSummary {
        total_count,
        average_rating,
        distribution,
        recommend_count,
        recommend_percentage: percentage(recommend_count, total_count),
    }
}

fn mean_of_rated(ratings: impl Iterator<Item = Option<u8>>) -> Option<f64> {
    let (sum, count) = ratings
        .flatten()
        .filter(|r| *r > 0)
        .fold((0u64, 0u64), |(sum, count), r| (sum + u64::from(r), count + 1));

    (count > 0).then(|| sum as f64 / count as f64)
}

/// Averages of the optional sub-ratings, counting only reviews that set them.
pub fn sub_rating_averages(reviews: &[Review]) -> SubRatingAverages {
    SubRatingAverages {
        delivery: mean_of_rated(reviews.iter().map(|r| r.delivery_rating)),
        communication: mean_of_rated(reviews.iter().map(|r| r.communication_rating)),
        value: mean_of_rated(reviews.iter().map(|r| r.value_rating)),
    }
}

pub fn rating_label(average: f64) -> RatingLabel {
    if average >= 4.5 {
        RatingLabel::Excellent
    } else if average >= 4.0 {
        RatingLabel::VeryGood
    } else if average >= 3.5 {
        RatingLabel::Good
    } else if average >= 3.0 {
        RatingLabel::Average
    } else if average >= 2.0 {
        RatingLabel::BelowAverage
    } else {
        RatingLabel::Poor
    }
}

/// One decimal place, as shown next to star ratings.
pub fn format_rating(average: f64) -> String {
    format!("{average:.1}")
}
