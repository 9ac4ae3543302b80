use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::models::{SwipeAction, SwipeEntry, User};

/// Record a swipe against a user record.
///
/// The history append is unconditional: duplicate swipes on the same
/// restaurant are permitted and all retained. The liked-set add is
/// idempotent, so duplicate likes (including racing ones replayed by the
/// store) never create duplicate liked entries. A dislike never retracts
/// an earlier like.
///
/// Returns the appended entry so the caller can confirm it without
/// echoing the whole user record.
pub fn record_swipe(
    user: &mut User,
    restaurant_id: &str,
    action: SwipeAction,
    timestamp: DateTime<Utc>,
) -> SwipeEntry {
    let entry = SwipeEntry {
        restaurant_id: restaurant_id.to_string(),
        action,
        timestamp,
    };
    user.swipe_history.push(entry.clone());

    if action == SwipeAction::Like && !user.liked_restaurants.iter().any(|id| id == restaurant_id) {
        user.liked_restaurants.push(restaurant_id.to_string());
    }

    entry
}

/// Clear a user's liked history: empty the liked set and drop every
/// "like" entry from the swipe history. Dislike entries survive.
/// Destructive and irreversible.
pub fn clear_liked_history(user: &mut User) {
    user.liked_restaurants.clear();
    user.swipe_history
        .retain(|entry| entry.action != SwipeAction::Like);
}

/// Like ratio as the API reports it: the literal number 0 for an empty
/// history, otherwise a string percentage with one decimal place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeRatio {
    Empty,
    Percent(String),
}

impl Serialize for LikeRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LikeRatio::Empty => serializer.serialize_u64(0),
            LikeRatio::Percent(value) => serializer.serialize_str(value),
        }
    }
}

/// Read-only statistics derived from a swipe history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeStats {
    pub total_swipes: usize,
    pub likes: usize,
    pub dislikes: usize,
    pub like_ratio: LikeRatio,
}

pub fn swipe_stats(history: &[SwipeEntry]) -> SwipeStats {
    let total_swipes = history.len();
    let likes = history
        .iter()
        .filter(|entry| entry.action == SwipeAction::Like)
        .count();
    let dislikes = total_swipes - likes;

    let like_ratio = if total_swipes == 0 {
        LikeRatio::Empty
    } else {
        LikeRatio::Percent(format!("{:.1}", likes as f64 / total_swipes as f64 * 100.0))
    };

    SwipeStats {
        total_swipes,
        likes,
        dislikes,
        like_ratio,
    }
}
