//! Shared test infrastructure for the catalog workspace.
//!
//! - [`TestDatabase`] boots a throwaway Postgres container with the schema
//!   migrated (feature `postgres`, on by default)
//! - [`TestDataBuilder`] derives reproducible ids and names from a seed
//! - [`assertions`] holds small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!     let brand_name = builder.name("brand", "main");
//! }
//! ```

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Seeded source of test fixtures.
///
/// Two builders with the same seed produce identical ids and names, so a
/// failing test replays with exactly the data it failed on.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds the builder from the test's own name. The usual entry point:
    /// every test gets distinct but stable fixtures.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A UUID derived from the seed (the seed bytes repeated twice).
    pub fn id(&self) -> Uuid {
        let seed_bytes = self.seed.to_le_bytes();
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&seed_bytes);
        bytes[8..].copy_from_slice(&seed_bytes);
        Uuid::from_bytes(bytes)
    }

    /// A name of the form `test-{prefix}-{seed}-{suffix}`, unique per seed
    /// so parallel tests sharing a database never collide.
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Unwraps an `Option`, panicking with `context` when it is `None`.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
