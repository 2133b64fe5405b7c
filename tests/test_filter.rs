mod common;

use common::{create_test_review, day, ratings, review_on};
use snafles_reviews::{
    models::Review,
    reviews::{RatingFilter, ReviewCriteria, SortKey, apply},
};

fn criteria_for_rating(stars: u8) -> ReviewCriteria {
    ReviewCriteria {
        rating_filter: RatingFilter::Exact(stars),
        ..Default::default()
    }
}

fn sample_reviews() -> Vec<Review> {
    let mut first = review_on(5, 1);
    first.title = "Love the fabric".into();
    first.user.name = "Amara".into();
    first.images = vec!["https://cdn.example.com/a.jpg".into()];
    first.verified = true;
    first.likes = 3;

    let mut second = review_on(3, 2);
    second.title = "Okay".into();
    second.comment = "Sizing runs SMALL".into();
    second.user.name = "Ben".into();
    second.dislikes = 4;

    let mut third = review_on(5, 3);
    third.title = "Great seller".into();
    third.user.name = "Chidi".into();
    third.verified = true;
    third.likes = 1;

    vec![first, second, third]
}

#[test]
fn test_rating_filter_newest_first() {
    let reviews = sample_reviews();
    let view = apply(&reviews, &criteria_for_rating(5), SortKey::Newest);

    assert_eq!(view.len(), 2);
    assert_eq!(view[0].created_at, day(3));
    assert_eq!(view[1].created_at, day(1));
    assert!(view.iter().all(|r| r.rating == 5));
}

#[test]
fn test_rating_filter_is_exact_not_threshold() {
    let reviews = sample_reviews();
    let view = apply(&reviews, &criteria_for_rating(3), SortKey::Newest);

    assert_eq!(ratings(&view), vec![3]);

    let none = apply(&reviews, &criteria_for_rating(4), SortKey::Newest);
    assert!(none.is_empty());
}

#[test]
fn test_empty_input() {
    let view = apply(&[], &ReviewCriteria::default(), SortKey::Newest);
    assert!(view.is_empty());
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    let reviews = sample_reviews();

    let by_title = ReviewCriteria {
        search_text: Some("FABRIC".into()),
        ..Default::default()
    };
    assert_eq!(apply(&reviews, &by_title, SortKey::Oldest).len(), 1);

    let by_comment = ReviewCriteria {
        search_text: Some("small".into()),
        ..Default::default()
    };
    let view = apply(&reviews, &by_comment, SortKey::Oldest);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].user.name, "Ben");

    let by_author = ReviewCriteria {
        search_text: Some("chid".into()),
        ..Default::default()
    };
    assert_eq!(apply(&reviews, &by_author, SortKey::Oldest)[0].title, "Great seller");

    let empty = ReviewCriteria {
        search_text: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(apply(&reviews, &empty, SortKey::Oldest).len(), 3);
}

#[test]
fn test_require_images() {
    let without_images = create_test_review(4);

    let strict = ReviewCriteria {
        require_images: true,
        ..Default::default()
    };
    assert!(apply(&[without_images.clone()], &strict, SortKey::Newest).is_empty());

    let relaxed = ReviewCriteria {
        require_images: false,
        ..Default::default()
    };
    assert_eq!(apply(&[without_images], &relaxed, SortKey::Newest).len(), 1);
}

#[test]
fn test_predicates_are_and_combined() {
    let reviews = sample_reviews();

    let verified_five = ReviewCriteria {
        rating_filter: RatingFilter::Exact(5),
        require_verified: true,
        require_images: true,
        ..Default::default()
    };
    let view = apply(&reviews, &verified_five, SortKey::Newest);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].user.name, "Amara");

    let verified = ReviewCriteria {
        require_verified: true,
        ..Default::default()
    };
    assert_eq!(apply(&reviews, &verified, SortKey::Newest).len(), 2);
}

#[test]
fn test_highest_is_non_increasing_and_stable() {
    let mut reviews = Vec::new();
    for (i, rating) in [3, 5, 1, 5, 3, 4].into_iter().enumerate() {
        let mut review = review_on(rating, i as u32 + 1);
        review.title = format!("review-{i}");
        reviews.push(review);
    }

    let view = apply(&reviews, &ReviewCriteria::default(), SortKey::Highest);
    assert_eq!(ratings(&view), vec![5, 5, 4, 3, 3, 1]);
    assert!(view.windows(2).all(|w| w[0].rating >= w[1].rating));

    // Ties keep input order.
    assert_eq!(view[0].title, "review-1");
    assert_eq!(view[1].title, "review-3");
    assert_eq!(view[3].title, "review-0");
    assert_eq!(view[4].title, "review-4");

    let lowest = apply(&reviews, &ReviewCriteria::default(), SortKey::Lowest);
    assert_eq!(ratings(&lowest), vec![1, 3, 3, 4, 5, 5]);
    assert_eq!(lowest[1].title, "review-0");
}

#[test]
fn test_most_helpful_handles_negative_scores() {
    let reviews = sample_reviews();
    let view = apply(&reviews, &ReviewCriteria::default(), SortKey::MostHelpful);

    let names: Vec<&str> = view.iter().map(|r| r.user.name.as_str()).collect();
    assert_eq!(names, vec!["Amara", "Chidi", "Ben"]);
    assert_eq!(view[2].helpfulness(), -4);
}

#[test]
fn test_oldest_and_unknown_sort() {
    let reviews = vec![review_on(2, 3), review_on(4, 1), review_on(3, 2)];

    let oldest = apply(&reviews, &ReviewCriteria::default(), SortKey::Oldest);
    assert_eq!(ratings(&oldest), vec![4, 3, 2]);

    let untouched = apply(&reviews, &ReviewCriteria::default(), SortKey::from("trending"));
    assert_eq!(ratings(&untouched), vec![2, 4, 3]);
}

#[test]
fn test_input_is_not_mutated() {
    let reviews = sample_reviews();
    let before = reviews.clone();

    let view = apply(&reviews, &criteria_for_rating(5), SortKey::Highest);

    assert_eq!(reviews, before);
    assert!(view.len() <= reviews.len());
}

#[test]
fn test_sort_key_parsing() {
    assert_eq!(SortKey::from("newest"), SortKey::Newest);
    assert_eq!(SortKey::from("oldest"), SortKey::Oldest);
    assert_eq!(SortKey::from("highest"), SortKey::Highest);
    assert_eq!(SortKey::from("lowest"), SortKey::Lowest);
    assert_eq!(SortKey::from("most_helpful"), SortKey::MostHelpful);
    assert_eq!(SortKey::from("random"), SortKey::Unsorted);
}

#[test]
fn test_rating_filter_parsing() {
    assert_eq!("all".parse::<RatingFilter>(), Ok(RatingFilter::All));
    assert_eq!("ALL".parse::<RatingFilter>(), Ok(RatingFilter::All));
    assert_eq!("".parse::<RatingFilter>(), Ok(RatingFilter::All));
    assert_eq!("4".parse::<RatingFilter>(), Ok(RatingFilter::Exact(4)));
    assert!("four".parse::<RatingFilter>().is_err());
}
