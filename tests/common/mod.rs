#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use snafles_reviews::models::{Review, ReviewAuthor, ReviewSubject};
use uuid::Uuid;

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0)
        .single()
        .expect("valid test date")
}

pub fn create_test_review(rating: u8) -> Review {
    Review {
        id: Uuid::new_v4(),
        user: ReviewAuthor {
            id: Uuid::new_v4(),
            name: "Test Shopper".into(),
            avatar_url: None,
        },
        rating,
        title: "Solid purchase".into(),
        comment: "Arrived on time".into(),
        images: Vec::new(),
        subject: ReviewSubject::product(Uuid::nil()),
        likes: 0,
        dislikes: 0,
        liked: false,
        disliked: false,
        recommend: false,
        verified: false,
        delivery_rating: None,
        communication_rating: None,
        value_rating: None,
        created_at: day(1),
        updated_at: day(1),
    }
}

pub fn review_on(rating: u8, d: u32) -> Review {
    Review {
        created_at: day(d),
        updated_at: day(d),
        ..create_test_review(rating)
    }
}

pub fn ratings(reviews: &[Review]) -> Vec<u8> {
    reviews.iter().map(|r| r.rating).collect()
}
