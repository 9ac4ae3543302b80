// Core domain logic exports
pub mod query;
pub mod session;
pub mod swipes;

pub use query::{build_query, trending_query, FilterClause, FilterError, RestaurantQuery, ResultOrder};
pub use session::{LikeStatus, SessionError, SessionLike, SessionState, SwipeSession};
pub use swipes::{clear_liked_history, record_swipe, swipe_stats, LikeRatio, SwipeStats};
