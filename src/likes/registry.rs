// Like Registry - isolates all Like Set persistence and its invariants
use async_trait::async_trait;
use rusqlite::params;
use std::sync::Arc;
use thiserror::Error;

use crate::auth::jwt::Claims;
use crate::catalog;
use crate::db::models::LikedRef;
use crate::error::AppError;
use crate::likes::{LikeOutcome, LikedSubmodelDetail, UnlikeOutcome};
use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum LikeError {
    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Model ID and Submodel ID are required")]
    MissingIds,

    #[error("Submodel not found")]
    SubmodelNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Access denied. You can only modify your own likes.")]
    NotOwner,
}

impl From<LikeError> for AppError {
    fn from(err: LikeError) -> Self {
        match err {
            LikeError::Pool(e) => AppError::Pool(e),
            LikeError::Sql(e) => AppError::Database(e),
            LikeError::App(e) => e,
            LikeError::MissingIds => {
                AppError::BadRequest("Model ID and Submodel ID are required".into())
            }
            LikeError::SubmodelNotFound => AppError::NotFound("Submodel not found".into()),
            LikeError::UserNotFound => AppError::NotFound("User not found".into()),
            LikeError::NotOwner => {
                AppError::Forbidden("Access denied. You can only modify your own likes.".into())
            }
        }
    }
}

/// Like Registry trait - all Like Set operations.
///
/// Callers pass their verified claims explicitly; there is no ambient auth
/// context. Existence of the referenced submodel is checked when a like is
/// created and never again, so entries may dangle once catalog rows are
/// deleted - reads skip them (see `detailed_liked`).
#[async_trait]
pub trait LikeRegistry: Send + Sync {
    /// Add the (model, submodel) pair to the user's Like Set if absent.
    /// Liking an already-liked pair is a success, not an error.
    /// The caller must be the user or an admin.
    async fn like(
        &self,
        caller: &Claims,
        user_id: &str,
        model_id: &str,
        submodel_id: &str,
    ) -> Result<LikeOutcome, LikeError>;

    /// Remove the pair from the user's Like Set if present. Removing an
    /// absent pair is a success. The catalog reference is not re-checked:
    /// only set membership matters. Any authenticated caller may unlike.
    async fn unlike(
        &self,
        caller: &Claims,
        user_id: &str,
        model_id: &str,
        submodel_id: &str,
    ) -> Result<UnlikeOutcome, LikeError>;

    /// The raw Like Set, in insertion order.
    async fn list_liked(&self, user_id: &str) -> Result<Vec<LikedRef>, LikeError>;

    /// Join the Like Set against the catalog. Entries whose model or
    /// submodel no longer exists are silently dropped.
    async fn detailed_liked(&self, user_id: &str) -> Result<Vec<LikedSubmodelDetail>, LikeError>;
}

/// SQLite implementation
pub struct SqliteLikeRegistry {
    pool: DbPool,
}

impl SqliteLikeRegistry {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRegistry for SqliteLikeRegistry {
    async fn like(
        &self,
        caller: &Claims,
        user_id: &str,
        model_id: &str,
        submodel_id: &str,
    ) -> Result<LikeOutcome, LikeError> {
        if model_id.is_empty() || submodel_id.is_empty() {
            return Err(LikeError::MissingIds);
        }
        if !caller.may_act_for(user_id) {
            return Err(LikeError::NotOwner);
        }

        let conn = self.pool.get()?;

        // The reference must be live at write time; it is not re-validated
        // afterwards.
        if !catalog::submodel_in_model(&conn, model_id, submodel_id)? {
            return Err(LikeError::SubmodelNotFound);
        }
        if !user_exists(&conn, user_id)? {
            return Err(LikeError::UserNotFound);
        }

        // Conditional set-add against the primary key: concurrent likes for
        // the same pair cannot produce duplicates, and a no-op reports as
        // already liked.
        let changed = match conn.execute(
            "INSERT OR IGNORE INTO liked_submodels (user_id, model_id, submodel_id)
             VALUES (?1, ?2, ?3)",
            params![user_id, model_id, submodel_id],
        ) {
            Ok(n) => n,
            // Only the users foreign key can fire here; duplicate-pair
            // conflicts are absorbed by OR IGNORE.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(LikeError::UserNotFound);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(if changed > 0 {
            LikeOutcome::Liked
        } else {
            LikeOutcome::AlreadyLiked
        })
    }

    async fn unlike(
        &self,
        _caller: &Claims,
        user_id: &str,
        model_id: &str,
        submodel_id: &str,
    ) -> Result<UnlikeOutcome, LikeError> {
        if model_id.is_empty() || submodel_id.is_empty() {
            return Err(LikeError::MissingIds);
        }

        let conn = self.pool.get()?;

        // Conditional remove-if-present; membership is the only thing that
        // matters, so a dangling pair can still be unliked.
        let changed = conn.execute(
            "DELETE FROM liked_submodels WHERE user_id = ?1 AND model_id = ?2 AND submodel_id = ?3",
            params![user_id, model_id, submodel_id],
        )?;

        if changed > 0 {
            Ok(UnlikeOutcome::Removed)
        } else if user_exists(&conn, user_id)? {
            Ok(UnlikeOutcome::WasNotLiked)
        } else {
            Err(LikeError::UserNotFound)
        }
    }

    async fn list_liked(&self, user_id: &str) -> Result<Vec<LikedRef>, LikeError> {
        let conn = self.pool.get()?;

        if !user_exists(&conn, user_id)? {
            return Err(LikeError::UserNotFound);
        }

        let mut stmt = conn.prepare(
            "SELECT model_id, submodel_id FROM liked_submodels WHERE user_id = ?1 ORDER BY rowid",
        )?;
        let refs = stmt
            .query_map(params![user_id], |row| {
                Ok(LikedRef {
                    model_id: row.get(0)?,
                    submodel_id: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(refs)
    }

    async fn detailed_liked(&self, user_id: &str) -> Result<Vec<LikedSubmodelDetail>, LikeError> {
        let likes = self.list_liked(user_id).await?;

        let conn = self.pool.get()?;
        let mut details = Vec::with_capacity(likes.len());

        for like in likes {
            // Skip-on-miss: a model or submodel deleted after the like was
            // recorded drops the entry from the result rather than erroring.
            let Some(model_name) = catalog::model_name(&conn, &like.model_id)? else {
                continue;
            };
            let Some(submodel) = catalog::submodel_in(&conn, &like.model_id, &like.submodel_id)?
            else {
                continue;
            };

            details.push(LikedSubmodelDetail {
                model_id: like.model_id,
                model_name,
                submodel_id: like.submodel_id,
                submodel,
            });
        }

        Ok(details)
    }
}

fn user_exists(conn: &rusqlite::Connection, user_id: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM users WHERE id = ?1",
        params![user_id],
        |row| row.get(0),
    )
}

/// Type alias for Arc-wrapped registry (for AppState)
pub type DynLikeRegistry = Arc<dyn LikeRegistry>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{NewModel, NewSubmodel};
    use crate::db;
    use crate::db::models::{ModelExtras, Role};
    use tempfile::TempDir;

    fn create_test_registry() -> (Arc<SqliteLikeRegistry>, DbPool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = db::create_pool(&temp_dir.path().join("test.db")).unwrap();
        db::run_migrations(&pool).unwrap();
        (Arc::new(SqliteLikeRegistry::new(pool.clone())), pool, temp_dir)
    }

    fn claims(user_id: &str, role: Role) -> Claims {
        Claims {
            id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            role,
            iat: 0,
            exp: i64::MAX,
        }
    }

    fn seed_user(pool: &DbPool, user_id: &str) {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO users (id, email, password_hash) VALUES (?1, ?2, 'hash')",
            params![user_id, format!("{}@example.com", user_id)],
        )
        .unwrap();
    }

    /// Seed a model with one submodel; returns (model_id, submodel_id).
    fn seed_model(pool: &DbPool, name: &str, horsepower: i64) -> (String, String) {
        let model = crate::catalog::create_model(
            pool,
            &NewModel {
                name: name.to_string(),
                year_introduced: 1986,
                year_discontinued: 0,
                description: "test model".to_string(),
                submodels: vec![NewSubmodel {
                    name: "Competition".to_string(),
                    engine_type: "I6".to_string(),
                    horsepower,
                    torque: 479,
                    transmission: "automatic".to_string(),
                    year: 2021,
                    image_url: None,
                    weight: None,
                    acceleration: None,
                    top_speed: None,
                    fuel_economy: None,
                    dimensions: None,
                }],
                country: None,
                designer: None,
                body_style: None,
                platform: None,
                predecessor: None,
                successor: None,
                image_url: None,
                extras: ModelExtras::default(),
            },
        )
        .unwrap();
        let submodel_id = model.submodels[0].id.clone();
        (model.id, submodel_id)
    }

    #[tokio::test]
    async fn like_then_list_round_trip() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        let (m, s) = seed_model(&pool, "M3", 503);
        let caller = claims("u1", Role::User);

        let outcome = registry.like(&caller, "u1", &m, &s).await.unwrap();
        assert_eq!(outcome, LikeOutcome::Liked);

        let liked = registry.list_liked("u1").await.unwrap();
        assert_eq!(
            liked,
            vec![LikedRef {
                model_id: m.clone(),
                submodel_id: s.clone(),
            }]
        );

        let outcome = registry.unlike(&caller, "u1", &m, &s).await.unwrap();
        assert_eq!(outcome, UnlikeOutcome::Removed);
        assert!(registry.list_liked("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn like_is_idempotent() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        let (m, s) = seed_model(&pool, "M3", 503);
        let caller = claims("u1", Role::User);

        assert_eq!(
            registry.like(&caller, "u1", &m, &s).await.unwrap(),
            LikeOutcome::Liked
        );
        assert_eq!(
            registry.like(&caller, "u1", &m, &s).await.unwrap(),
            LikeOutcome::AlreadyLiked
        );

        assert_eq!(registry.list_liked("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unlike_absent_pair_is_noop_success() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        let caller = claims("u1", Role::User);

        let outcome = registry.unlike(&caller, "u1", "m1", "s1").await.unwrap();
        assert_eq!(outcome, UnlikeOutcome::WasNotLiked);
        assert!(registry.list_liked("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_ids_are_rejected() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        let caller = claims("u1", Role::User);

        assert!(matches!(
            registry.like(&caller, "u1", "", "s1").await,
            Err(LikeError::MissingIds)
        ));
        assert!(matches!(
            registry.unlike(&caller, "u1", "m1", "").await,
            Err(LikeError::MissingIds)
        ));
    }

    #[tokio::test]
    async fn like_unknown_submodel_is_not_found() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        let (m, _s) = seed_model(&pool, "M3", 503);
        let caller = claims("u1", Role::User);

        assert!(matches!(
            registry.like(&caller, "u1", &m, "nope").await,
            Err(LikeError::SubmodelNotFound)
        ));
        assert!(matches!(
            registry.like(&caller, "u1", "nope", "nope").await,
            Err(LikeError::SubmodelNotFound)
        ));
    }

    #[tokio::test]
    async fn like_unknown_user_is_not_found() {
        let (registry, pool, _tmp) = create_test_registry();
        let (m, s) = seed_model(&pool, "M3", 503);
        let caller = claims("ghost", Role::Admin);

        assert!(matches!(
            registry.like(&caller, "ghost", &m, &s).await,
            Err(LikeError::UserNotFound)
        ));
        assert!(matches!(
            registry.unlike(&caller, "ghost", &m, &s).await,
            Err(LikeError::UserNotFound)
        ));
        assert!(matches!(
            registry.list_liked("ghost").await,
            Err(LikeError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn like_requires_owner_or_admin() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        seed_user(&pool, "u2");
        let (m, s) = seed_model(&pool, "M3", 503);

        let stranger = claims("u2", Role::User);
        assert!(matches!(
            registry.like(&stranger, "u1", &m, &s).await,
            Err(LikeError::NotOwner)
        ));

        let admin = claims("root", Role::Admin);
        assert_eq!(
            registry.like(&admin, "u1", &m, &s).await.unwrap(),
            LikeOutcome::Liked
        );
    }

    #[tokio::test]
    async fn detailed_liked_denormalizes_current_catalog_state() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        let (m, s) = seed_model(&pool, "M3", 503);
        let caller = claims("u1", Role::User);

        registry.like(&caller, "u1", &m, &s).await.unwrap();

        let details = registry.detailed_liked("u1").await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].model_id, m);
        assert_eq!(details[0].model_name, "M3");
        assert_eq!(details[0].submodel_id, s);
        assert_eq!(details[0].submodel.horsepower, 503);

        // The model name is read at aggregation time, not cached at like time
        crate::catalog::update_model(
            &pool,
            &m,
            crate::catalog::ModelUpdate {
                name: Some("M3 (G80)".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let details = registry.detailed_liked("u1").await.unwrap();
        assert_eq!(details[0].model_name, "M3 (G80)");
    }

    #[tokio::test]
    async fn detailed_liked_skips_dangling_references() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        let (m1, s1) = seed_model(&pool, "M3", 503);
        let (m2, s2) = seed_model(&pool, "M5", 600);
        let caller = claims("u1", Role::User);

        registry.like(&caller, "u1", &m1, &s1).await.unwrap();
        registry.like(&caller, "u1", &m2, &s2).await.unwrap();

        crate::catalog::delete_model(&pool, &m2).unwrap();

        // The raw set still holds both pairs; aggregation drops the dead one
        assert_eq!(registry.list_liked("u1").await.unwrap().len(), 2);
        let details = registry.detailed_liked("u1").await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].model_id, m1);
    }

    #[tokio::test]
    async fn detailed_liked_skips_deleted_submodel_but_keeps_model_entries() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        let (m, s1) = seed_model(&pool, "M3", 503);
        let s2 = crate::catalog::add_submodel(
            &pool,
            &m,
            &NewSubmodel {
                name: "CS".to_string(),
                engine_type: "I6".to_string(),
                horsepower: 543,
                torque: 479,
                transmission: "automatic".to_string(),
                year: 2023,
                image_url: None,
                weight: None,
                acceleration: None,
                top_speed: None,
                fuel_economy: None,
                dimensions: None,
            },
        )
        .unwrap()
        .unwrap();
        let caller = claims("u1", Role::User);

        registry.like(&caller, "u1", &m, &s1).await.unwrap();
        registry.like(&caller, "u1", &m, &s2.id).await.unwrap();

        crate::catalog::delete_submodel(&pool, &m, &s1).unwrap();

        let details = registry.detailed_liked("u1").await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].submodel_id, s2.id);
    }

    #[tokio::test]
    async fn dangling_pair_can_still_be_unliked() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        let (m, s) = seed_model(&pool, "M3", 503);
        let caller = claims("u1", Role::User);

        registry.like(&caller, "u1", &m, &s).await.unwrap();
        crate::catalog::delete_model(&pool, &m).unwrap();

        assert_eq!(
            registry.unlike(&caller, "u1", &m, &s).await.unwrap(),
            UnlikeOutcome::Removed
        );
        assert!(registry.list_liked("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_likes_produce_single_entry() {
        let (registry, pool, _tmp) = create_test_registry();
        seed_user(&pool, "u1");
        let (m, s) = seed_model(&pool, "M3", 503);

        let spawn_like = |registry: Arc<SqliteLikeRegistry>, m: String, s: String| {
            tokio::spawn(async move {
                registry
                    .like(&claims("u1", Role::User), "u1", &m, &s)
                    .await
            })
        };

        let a = spawn_like(registry.clone(), m.clone(), s.clone());
        let b = spawn_like(registry.clone(), m.clone(), s.clone());

        let ra = a.await.unwrap().unwrap();
        let rb = b.await.unwrap().unwrap();

        // Exactly one call inserted; the other observed the existing entry
        assert!(
            (ra == LikeOutcome::Liked) ^ (rb == LikeOutcome::Liked),
            "expected exactly one insert, got {:?} and {:?}",
            ra,
            rb
        );

        let conn = pool.get().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM liked_submodels WHERE user_id = 'u1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
