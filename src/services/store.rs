use std::collections::HashMap;
use std::time::Duration;

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use thiserror::Error;

use crate::core::query::{FilterClause, RestaurantQuery, ResultOrder};
use crate::models::{
    DietaryTag, Location, PriceTier, Restaurant, SwipeEntry, User, UserPreferences,
};

/// Errors that can occur when interacting with the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// PostgreSQL-backed record store for restaurants and user accounts.
///
/// The user record is a single row: preferences and swipe history live in
/// JSONB columns so "persist the user record" stays one write, serialized
/// at the storage layer. Conflicting writes to the same user interleave
/// at row granularity; the liked-set add is idempotent in the domain
/// layer, so racing likes never produce duplicate liked entries.
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Connect and run migrations.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// List restaurants matching a translated query.
    ///
    /// Renders the AND-combined clauses to SQL; the in-memory predicate
    /// on [`RestaurantQuery`] is the behavioral reference this must agree
    /// with.
    pub async fn list_restaurants(
        &self,
        query: &RestaurantQuery,
    ) -> Result<Vec<Restaurant>, StoreError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(restaurant_select_sql().to_string());

        for (i, clause) in query.clauses.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            match clause {
                FilterClause::PriceTier(tier) => {
                    builder.push("price_range = ");
                    builder.push_bind(tier.as_str());
                }
                FilterClause::DistanceAtMost(ceiling) => {
                    builder.push("distance <= ");
                    builder.push_bind(*ceiling);
                }
                FilterClause::DietaryAny(tags) => {
                    let tags: Vec<String> =
                        tags.iter().map(|t| t.as_str().to_string()).collect();
                    builder.push("dietary_options && ");
                    builder.push_bind(tags);
                }
                FilterClause::Cuisine(cuisine) => {
                    builder.push("cuisine_type = ");
                    builder.push_bind(cuisine.clone());
                }
                FilterClause::ExcludeIds(ids) => {
                    builder.push("id <> ALL(");
                    builder.push_bind(ids.clone());
                    builder.push(")");
                }
            }
        }

        match query.order {
            ResultOrder::RatingDesc => builder.push(" ORDER BY rating DESC"),
            ResultOrder::RatingThenRecency => {
                builder.push(" ORDER BY rating DESC, created_at DESC")
            }
        };

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit as i64);
        }

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(restaurant_from_row).collect()
    }

    pub async fn get_restaurant(&self, id: &str) -> Result<Option<Restaurant>, StoreError> {
        let sql = format!("{} WHERE id = $1", restaurant_select_sql());
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;

        row.as_ref().map(restaurant_from_row).transpose()
    }

    /// Resolve restaurant ids into full records, preserving the order of
    /// the given ids (the liked-set's insertion order is display order).
    pub async fn restaurants_by_ids(&self, ids: &[String]) -> Result<Vec<Restaurant>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("{} WHERE id = ANY($1)", restaurant_select_sql());
        let rows = sqlx::query(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_id: HashMap<String, Restaurant> = rows
            .iter()
            .map(|row| restaurant_from_row(row).map(|r| (r.id.clone(), r)))
            .collect::<Result<_, _>>()?;

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Insert a new user row. A unique-violation on the email column
    /// surfaces as [`StoreError::DuplicateEmail`].
    pub async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, preferences, swipe_history, liked_restaurants, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Json(&user.preferences))
        .bind(Json(&user.swipe_history))
        .bind(&user.liked_restaurants)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!("{} WHERE email = $1", user_select_sql()))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    pub async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", user_select_sql()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Persist the mutable parts of a user record in one write.
    pub async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE users
            SET preferences = $2,
                swipe_history = $3,
                liked_restaurants = $4
            WHERE id = $1
            "#,
        )
        .bind(&user.id)
        .bind(Json(&user.preferences))
        .bind(Json(&user.swipe_history))
        .bind(&user.liked_restaurants)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Persisted user record {}", user.id);

        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn restaurant_select_sql() -> &'static str {
    "SELECT id, name, description, rating, price_range, distance, cuisine_type, \
     dietary_options, image_url, address, phone, website, hours, tags, lat, lng, created_at \
     FROM restaurants"
}

fn restaurant_from_row(row: &PgRow) -> Result<Restaurant, StoreError> {
    let price_raw: String = row.get("price_range");
    let price_range = PriceTier::parse(&price_raw)
        .ok_or_else(|| StoreError::InvalidRecord(format!("price tier {:?}", price_raw)))?;

    let dietary_raw: Vec<String> = row.get("dietary_options");
    let dietary_options = dietary_raw
        .iter()
        .map(|tag| {
            DietaryTag::parse(tag)
                .ok_or_else(|| StoreError::InvalidRecord(format!("dietary tag {:?}", tag)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Restaurant {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        rating: row.get("rating"),
        price_range,
        distance: row.get("distance"),
        cuisine_type: row.get("cuisine_type"),
        dietary_options,
        image_url: row.get("image_url"),
        address: row.get("address"),
        phone: row.get("phone"),
        website: row.get("website"),
        hours: row.get("hours"),
        tags: row.get("tags"),
        location: Location {
            lat: row.get("lat"),
            lng: row.get("lng"),
        },
        created_at: row.get("created_at"),
    })
}

fn user_select_sql() -> &'static str {
    "SELECT id, email, password_hash, preferences, swipe_history, liked_restaurants, created_at \
     FROM users"
}

fn user_from_row(row: &PgRow) -> User {
    let Json(preferences): Json<UserPreferences> = row.get("preferences");
    let Json(swipe_history): Json<Vec<SwipeEntry>> = row.get("swipe_history");

    User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        preferences,
        swipe_history,
        liked_restaurants: row.get("liked_restaurants"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_email_error_message() {
        let err = StoreError::DuplicateEmail;
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_select_lists_every_restaurant_column() {
        let sql = restaurant_select_sql();
        for column in [
            "rating",
            "price_range",
            "distance",
            "cuisine_type",
            "dietary_options",
            "created_at",
        ] {
            assert!(sql.contains(column), "missing column {}", column);
        }
    }
}
