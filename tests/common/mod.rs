//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use diesel::RunQueryDsl;
use diesel::sql_types::{BigInt, Integer, Nullable, Text, Timestamp};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbConnection, DbPool, establish_connection_pool};
use pushkind_common::domain::auth::AuthenticatedUser;
use tempfile::TempDir;

use starbound_market::STAFF_ROLE;
use starbound_market::domain::auth::Principal;
use starbound_market::domain::product::ProductStatus;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests. The file lives in its own
/// temporary directory, removed together with the `-shm`/`-wal` companions.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let path = path.to_str().expect("Temporary path is not UTF-8.");

        let pool = establish_connection_pool(path).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn conn(&self) -> DbConnection {
        self.pool.get().expect("Failed to get SQLite connection from pool.")
    }

    pub fn seed_user(&self, id: i32, username: &str) {
        diesel::sql_query(
            "INSERT INTO users (id, username, first_name, last_name, email) VALUES (?, ?, '', '', ?)",
        )
        .bind::<Integer, _>(id)
        .bind::<Text, _>(username)
        .bind::<Text, _>(format!("{username}@example.com"))
        .execute(&mut self.conn())
        .expect("insert user");
    }

    pub fn seed_category(&self, id: i32, name: &str) {
        diesel::sql_query("INSERT INTO categories (id, name) VALUES (?, ?)")
            .bind::<Integer, _>(id)
            .bind::<Text, _>(name)
            .execute(&mut self.conn())
            .expect("insert category");
    }

    pub fn seed_location(&self, id: i32, name: &str) {
        diesel::sql_query("INSERT INTO locations (id, name) VALUES (?, ?)")
            .bind::<Integer, _>(id)
            .bind::<Text, _>(name)
            .execute(&mut self.conn())
            .expect("insert location");
    }

    pub fn seed_product(&self, product: &ProductSeed) {
        let mut conn = self.conn();
        diesel::sql_query(
            "INSERT INTO products (id, title, slug, description, price_cents, status, location_id, date) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind::<Integer, _>(product.id)
        .bind::<Text, _>(&product.title)
        .bind::<Text, _>(&product.slug)
        .bind::<Text, _>(&product.description)
        .bind::<BigInt, _>(product.price_cents)
        .bind::<Text, _>(product.status.as_str())
        .bind::<Nullable<Integer>, _>(product.location_id)
        .bind::<Timestamp, _>(product.date)
        .execute(&mut conn)
        .expect("insert product");

        for category_id in &product.categories {
            diesel::sql_query(
                "INSERT INTO product_categories (product_id, category_id) VALUES (?, ?)",
            )
            .bind::<Integer, _>(product.id)
            .bind::<Integer, _>(*category_id)
            .execute(&mut conn)
            .expect("insert product category");
        }
    }
}

/// Row data for [`TestDb::seed_product`].
#[derive(Debug, Clone)]
pub struct ProductSeed {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i64,
    pub status: ProductStatus,
    pub location_id: Option<i32>,
    pub categories: Vec<i32>,
    pub date: NaiveDateTime,
}

impl ProductSeed {
    /// Active product with no location or categories, dated `day` of June 2025.
    pub fn new(id: i32, slug: &str, price_cents: i64, day: u32) -> Self {
        Self {
            id,
            title: format!("Product {slug}"),
            slug: slug.to_string(),
            description: String::new(),
            price_cents,
            status: ProductStatus::Active,
            location_id: None,
            categories: Vec::new(),
            date: june(day),
        }
    }

    pub fn status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn location(mut self, location_id: i32) -> Self {
        self.location_id = Some(location_id);
        self
    }

    pub fn categories(mut self, categories: &[i32]) -> Self {
        self.categories = categories.to_vec();
        self
    }
}

pub fn june(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, day)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid date")
}

pub fn customer(user_id: i32) -> Principal {
    Principal::new(user_id, false)
}

pub fn staff(user_id: i32) -> Principal {
    Principal::new(user_id, true)
}

/// Session claims as the identity middleware would hand them over.
pub fn session_user(user_id: i32, is_staff: bool) -> AuthenticatedUser {
    let roles = if is_staff {
        vec![STAFF_ROLE.to_string()]
    } else {
        Vec::new()
    };
    AuthenticatedUser {
        sub: user_id.to_string(),
        email: format!("user{user_id}@example.com"),
        hub_id: 1,
        name: format!("User {user_id}"),
        roles,
        exp: 0,
    }
}
