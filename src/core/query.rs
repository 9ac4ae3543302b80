use thiserror::Error;

use crate::models::{DietaryTag, ListFilters, PriceTier, Restaurant};

/// How many restaurants the trending feed returns at most.
pub const TRENDING_LIMIT: usize = 10;

/// One recognized listing filter. Each variant corresponds to exactly one
/// query parameter; absent parameters produce no clause at all.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Exact price tier match.
    PriceTier(PriceTier),
    /// Distance less than or equal to the given ceiling.
    DistanceAtMost(f64),
    /// Dietary tag sets intersect (membership, not subset).
    DietaryAny(Vec<DietaryTag>),
    /// Exact cuisine match.
    Cuisine(String),
    /// Restaurant id not in the given list.
    ExcludeIds(Vec<String>),
}

impl FilterClause {
    /// Reference predicate for a single clause.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        match self {
            FilterClause::PriceTier(tier) => restaurant.price_range == *tier,
            FilterClause::DistanceAtMost(ceiling) => restaurant.distance <= *ceiling,
            FilterClause::DietaryAny(tags) => tags
                .iter()
                .any(|tag| restaurant.dietary_options.contains(tag)),
            FilterClause::Cuisine(cuisine) => restaurant.cuisine_type == *cuisine,
            FilterClause::ExcludeIds(ids) => !ids.contains(&restaurant.id),
        }
    }
}

/// Result ordering for a restaurant listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrder {
    /// Rating descending.
    RatingDesc,
    /// Rating descending, ties broken by recency descending.
    RatingThenRecency,
}

/// A translated store query: AND-combined clauses plus an ordering and an
/// optional result cap.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantQuery {
    pub clauses: Vec<FilterClause>,
    pub order: ResultOrder,
    pub limit: Option<usize>,
}

impl RestaurantQuery {
    /// All clauses must hold (logical AND). A query with no clauses
    /// matches every restaurant.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.clauses.iter().all(|clause| clause.matches(restaurant))
    }

    /// In-memory reference evaluation: filter, order, and cap. The store
    /// renders the same clauses to SQL; this is the behavioral contract
    /// it must agree with.
    pub fn apply(&self, restaurants: Vec<Restaurant>) -> Vec<Restaurant> {
        let mut results: Vec<Restaurant> = restaurants
            .into_iter()
            .filter(|r| self.matches(r))
            .collect();

        results.sort_by(|a, b| {
            let by_rating = b
                .rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal);
            match self.order {
                ResultOrder::RatingDesc => by_rating,
                ResultOrder::RatingThenRecency => {
                    by_rating.then_with(|| b.created_at.cmp(&a.created_at))
                }
            }
        });

        if let Some(limit) = self.limit {
            results.truncate(limit);
        }
        results
    }
}

/// Rejected filter values. These are client errors, not store failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Unknown price tier: {0}")]
    UnknownPriceTier(String),
    #[error("Unknown dietary option: {0}")]
    UnknownDietaryTag(String),
}

/// Translate listing query parameters into a store query.
///
/// Each present filter contributes exactly one clause; absent filters are
/// omitted entirely. `dietary` and `exclude_swiped_ids` accept comma-joined
/// values; empty segments are dropped.
pub fn build_query(filters: &ListFilters) -> Result<RestaurantQuery, FilterError> {
    let mut clauses = Vec::new();

    if let Some(budget) = &filters.budget {
        let tier = PriceTier::parse(budget)
            .ok_or_else(|| FilterError::UnknownPriceTier(budget.clone()))?;
        clauses.push(FilterClause::PriceTier(tier));
    }

    if let Some(max_distance) = filters.max_distance {
        clauses.push(FilterClause::DistanceAtMost(max_distance));
    }

    if let Some(dietary) = &filters.dietary {
        let tags = split_csv(dietary)
            .map(|raw| {
                DietaryTag::parse(raw).ok_or_else(|| FilterError::UnknownDietaryTag(raw.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if !tags.is_empty() {
            clauses.push(FilterClause::DietaryAny(tags));
        }
    }

    if let Some(cuisine) = &filters.cuisine {
        clauses.push(FilterClause::Cuisine(cuisine.clone()));
    }

    if let Some(exclude) = &filters.exclude_swiped_ids {
        let ids: Vec<String> = split_csv(exclude).map(str::to_string).collect();
        if !ids.is_empty() {
            clauses.push(FilterClause::ExcludeIds(ids));
        }
    }

    Ok(RestaurantQuery {
        clauses,
        order: ResultOrder::RatingDesc,
        limit: None,
    })
}

/// Query backing the trending feed: unfiltered, rating then recency,
/// capped at [`TRENDING_LIMIT`].
pub fn trending_query() -> RestaurantQuery {
    RestaurantQuery {
        clauses: Vec::new(),
        order: ResultOrder::RatingThenRecency,
        limit: Some(TRENDING_LIMIT),
    }
}

fn split_csv(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}
