// Integration tests driving the filter translator, the swipe recorder,
// and the client swipe session together.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use swipebites::core::{clear_liked_history, LikeStatus, SessionState};
use swipebites::models::{DietaryTag, ListFilters, Location, PriceTier, Restaurant};
use swipebites::{build_query, record_swipe, SwipeAction, SwipeSession, User};

fn restaurant(id: &str, tier: PriceTier, distance: f64, rating: f64) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: format!("Restaurant {}", id),
        description: "A place to eat".to_string(),
        rating,
        price_range: tier,
        distance,
        cuisine_type: "italian".to_string(),
        dietary_options: vec![DietaryTag::Vegetarian],
        image_url: String::new(),
        address: "1 Main St".to_string(),
        phone: None,
        website: None,
        hours: "9:00 AM - 9:00 PM".to_string(),
        tags: vec![],
        location: Location { lat: 0.0, lng: 0.0 },
        created_at: Utc::now(),
    }
}

fn test_user() -> User {
    User::new(
        "u1".to_string(),
        "diner@example.com".to_string(),
        "hash".to_string(),
        Utc::now(),
    )
}

#[test]
fn test_budget_and_distance_filtering_end_to_end() {
    // One seeded restaurant with priceRange "$" and distance 2.
    let seeded = vec![restaurant("cheap-and-close", PriceTier::Budget, 2.0, 4.5)];

    // budget=$ and maxDistance=3 returns it.
    let filters = ListFilters {
        budget: Some("$".to_string()),
        max_distance: Some(3.0),
        ..Default::default()
    };
    let query = build_query(&filters).unwrap();
    let results = query.apply(seeded.clone());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "cheap-and-close");

    // maxDistance=1 excludes it.
    let filters = ListFilters {
        max_distance: Some(1.0),
        ..Default::default()
    };
    let query = build_query(&filters).unwrap();
    assert!(query.apply(seeded).is_empty());
}

#[test]
fn test_session_and_server_record_agree() {
    // Feed a filtered listing into a client session and mirror each
    // decision into the server-side user record.
    let listing: Vec<Restaurant> = (0..5)
        .map(|i| restaurant(&format!("r{}", i), PriceTier::Moderate, 1.0, 4.0))
        .collect();

    let mut session = SwipeSession::new();
    let mut rng = StdRng::seed_from_u64(3);
    session.feed_loaded(listing, &mut rng);

    let mut user = test_user();
    let mut flip = false;
    while session.current().is_some() {
        let action = if flip {
            SwipeAction::Like
        } else {
            SwipeAction::Dislike
        };
        flip = !flip;

        let restaurant_id = session.begin_decision(action).unwrap();
        record_swipe(&mut user, &restaurant_id, action, Utc::now());
        session.complete_decision(true);
    }

    assert_eq!(session.state(), SessionState::Exhausted);
    assert_eq!(user.swipe_history.len(), 5);

    // Every confirmed session like is in the persistent liked set.
    assert!(session
        .session_likes()
        .iter()
        .all(|like| like.status == LikeStatus::Confirmed));
    let session_ids: Vec<&str> = session
        .session_likes()
        .iter()
        .map(|like| like.restaurant_id.as_str())
        .collect();
    assert_eq!(
        session_ids,
        user.liked_restaurants
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_clearing_liked_history_after_a_session() {
    let mut user = test_user();
    record_swipe(&mut user, "r1", SwipeAction::Like, Utc::now());
    record_swipe(&mut user, "r2", SwipeAction::Dislike, Utc::now());
    record_swipe(&mut user, "r3", SwipeAction::Like, Utc::now());

    clear_liked_history(&mut user);

    assert!(user.liked_restaurants.is_empty());
    assert_eq!(user.swipe_history.len(), 1);
    assert_eq!(user.swipe_history[0].restaurant_id, "r2");
    assert_eq!(user.swipe_history[0].action, SwipeAction::Dislike);

    // Liking again after a clear starts a fresh liked set.
    record_swipe(&mut user, "r3", SwipeAction::Like, Utc::now());
    assert_eq!(user.liked_restaurants, vec!["r3".to_string()]);
}

#[test]
fn test_excluded_swiped_ids_shrink_the_next_feed() {
    let all: Vec<Restaurant> = (0..4)
        .map(|i| restaurant(&format!("r{}", i), PriceTier::Moderate, 1.0, 4.0))
        .collect();

    // A client passes the ids it already swiped as a comma-joined string.
    let filters = ListFilters {
        exclude_swiped_ids: Some("r0,r2".to_string()),
        ..Default::default()
    };
    let query = build_query(&filters).unwrap();
    let remaining = query.apply(all);

    let ids: Vec<&str> = remaining.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"r1"));
    assert!(ids.contains(&"r3"));
}
