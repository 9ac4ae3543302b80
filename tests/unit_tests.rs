// Unit tests for the SwipeBites public library surface

use chrono::Utc;
use swipebites::core::query::FilterClause;
use swipebites::core::swipes::LikeRatio;
use swipebites::models::{DietaryTag, ListFilters, Location, PriceTier, Restaurant};
use swipebites::{build_query, record_swipe, swipe_stats, trending_query, SwipeAction, User};

fn restaurant(id: &str, tier: PriceTier, distance: f64, rating: f64) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: format!("Restaurant {}", id),
        description: "A place to eat".to_string(),
        rating,
        price_range: tier,
        distance,
        cuisine_type: "mexican".to_string(),
        dietary_options: vec![DietaryTag::Vegetarian, DietaryTag::GlutenFree],
        image_url: String::new(),
        address: "1 Main St".to_string(),
        phone: None,
        website: None,
        hours: "9:00 AM - 9:00 PM".to_string(),
        tags: vec!["casual".to_string()],
        location: Location { lat: 0.0, lng: 0.0 },
        created_at: Utc::now(),
    }
}

#[test]
fn test_translator_only_ands_present_filters() {
    let filters = ListFilters {
        budget: Some("$$".to_string()),
        dietary: Some("gluten-free".to_string()),
        ..Default::default()
    };
    let query = build_query(&filters).unwrap();

    assert_eq!(query.clauses.len(), 2);
    assert!(!query
        .clauses
        .iter()
        .any(|c| matches!(c, FilterClause::DistanceAtMost(_))));
    assert!(!query
        .clauses
        .iter()
        .any(|c| matches!(c, FilterClause::Cuisine(_))));
}

#[test]
fn test_translator_exclusion_from_comma_joined_string() {
    let filters = ListFilters {
        exclude_swiped_ids: Some("r1,r2".to_string()),
        ..Default::default()
    };
    let query = build_query(&filters).unwrap();

    assert!(!query.matches(&restaurant("r1", PriceTier::Budget, 1.0, 4.0)));
    assert!(query.matches(&restaurant("r3", PriceTier::Budget, 1.0, 4.0)));
}

#[test]
fn test_trending_is_capped_at_ten() {
    let query = trending_query();
    let many: Vec<Restaurant> = (0..30)
        .map(|i| restaurant(&format!("r{}", i), PriceTier::Moderate, 1.0, 3.0 + (i as f64) / 30.0))
        .collect();

    let results = query.apply(many);
    assert_eq!(results.len(), 10);
    // Highest rated first.
    assert!(results
        .windows(2)
        .all(|pair| pair[0].rating >= pair[1].rating));
}

#[test]
fn test_swipe_recording_invariants() {
    let mut user = User::new(
        "u1".to_string(),
        "diner@example.com".to_string(),
        "hash".to_string(),
        Utc::now(),
    );

    record_swipe(&mut user, "r1", SwipeAction::Like, Utc::now());
    assert_eq!(user.swipe_history.len(), 1);
    assert_eq!(user.liked_restaurants.len(), 1);

    // Same like again: history grows, liked set does not.
    record_swipe(&mut user, "r1", SwipeAction::Like, Utc::now());
    assert_eq!(user.swipe_history.len(), 2);
    assert_eq!(user.liked_restaurants.len(), 1);

    // Dislike never changes the liked set.
    record_swipe(&mut user, "r1", SwipeAction::Dislike, Utc::now());
    record_swipe(&mut user, "r9", SwipeAction::Dislike, Utc::now());
    assert_eq!(user.liked_restaurants, vec!["r1".to_string()]);
}

#[test]
fn test_stats_asymmetry_between_empty_and_nonempty() {
    let empty = swipe_stats(&[]);
    assert_eq!(serde_json::to_value(&empty).unwrap()["likeRatio"], 0);

    let mut user = User::new(
        "u1".to_string(),
        "diner@example.com".to_string(),
        "hash".to_string(),
        Utc::now(),
    );
    for (id, action) in [
        ("a", SwipeAction::Like),
        ("b", SwipeAction::Like),
        ("c", SwipeAction::Dislike),
        ("d", SwipeAction::Like),
    ] {
        record_swipe(&mut user, id, action, Utc::now());
    }

    let stats = swipe_stats(&user.swipe_history);
    assert_eq!(stats.total_swipes, 4);
    assert_eq!(stats.likes, 3);
    assert_eq!(stats.dislikes, 1);
    assert_eq!(stats.like_ratio, LikeRatio::Percent("75.0".to_string()));
    assert_eq!(
        serde_json::to_value(&stats).unwrap()["likeRatio"],
        "75.0"
    );
}
