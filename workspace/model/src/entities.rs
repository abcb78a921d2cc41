//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the production-forecast application here:
//! account holders, their lazily-created profiles, revocable login
//! sessions and the per-user prediction history.

pub mod prediction_record;
pub mod profile;
pub mod session;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::prediction_record::Entity as PredictionRecord;
    pub use super::profile::Entity as Profile;
    pub use super::session::Entity as Session;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Try to apply migrations first
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let now = Utc::now();

        // Create users
        let user1 = user::ActiveModel {
            uid: Set("uid-1".to_string()),
            email: Set("nimal@paddy.lk".to_string()),
            name: Set("Nimal Perera".to_string()),
            password_hash: Set("$argon2id$stub".to_string()),
            created_at: Set(now),
        }
        .insert(&db)
        .await?;

        let user2 = user::ActiveModel {
            uid: Set("uid-2".to_string()),
            email: Set("kumari@paddy.lk".to_string()),
            name: Set("Kumari Silva".to_string()),
            password_hash: Set("$argon2id$stub".to_string()),
            created_at: Set(now),
        }
        .insert(&db)
        .await?;

        // Profile for user1 only; user2 stays profile-less (legal state)
        let profile1 = profile::ActiveModel {
            uid: Set(user1.uid.clone()),
            email: Set(user1.email.clone()),
            name: Set(user1.name.clone()),
            role: Set(Some("farmer".to_string())),
            role_set_at: Set(Some(now)),
            created_at: Set(now),
        }
        .insert(&db)
        .await?;

        // Two sessions for user1, one revoked
        let live_session = session::ActiveModel {
            id: Set("sid-live".to_string()),
            user_id: Set(user1.uid.clone()),
            issued_at: Set(now),
            expires_at: Set(now + Duration::hours(24)),
            revoked: Set(false),
        }
        .insert(&db)
        .await?;

        session::ActiveModel {
            id: Set("sid-dead".to_string()),
            user_id: Set(user1.uid.clone()),
            issued_at: Set(now - Duration::hours(48)),
            expires_at: Set(now - Duration::hours(24)),
            revoked: Set(true),
        }
        .insert(&db)
        .await?;

        // Prediction history for user1
        for (i, year) in [2022, 2023, 2024].iter().enumerate() {
            prediction_record::ActiveModel {
                user_id: Set(user1.uid.clone()),
                year: Set(*year),
                season: Set("Maha".to_string()),
                district: Set("KURUNEGALA".to_string()),
                sown_hect: Set(1200.0 + i as f64),
                previous_yield: Set(4.2),
                previous_production: Set(61000.0),
                predicted_extent: Set(1100.0),
                predicted_production: Set(58000.0 + i as f64),
                created_at: Set(now + Duration::seconds(i as i64)),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        // Verify users
        let users = User::find().all(&db).await?;
        assert_eq!(users.len(), 2);
        assert!(users.iter().any(|u| u.email == "nimal@paddy.lk"));
        assert!(users.iter().any(|u| u.email == "kumari@paddy.lk"));

        // Verify profile state
        let profiles = Profile::find().all(&db).await?;
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].uid, profile1.uid);
        assert_eq!(profiles[0].role.as_deref(), Some("farmer"));
        assert!(profiles[0].role_set_at.is_some());
        let missing = Profile::find_by_id(user2.uid.clone()).one(&db).await?;
        assert!(missing.is_none());

        // Verify sessions and the revocation filter
        let open_sessions = Session::find()
            .filter(session::Column::UserId.eq(user1.uid.clone()))
            .filter(session::Column::Revoked.eq(false))
            .all(&db)
            .await?;
        assert_eq!(open_sessions.len(), 1);
        assert_eq!(open_sessions[0].id, live_session.id);

        // Verify the history is orderable newest-first
        let history = PredictionRecord::find()
            .filter(prediction_record::Column::UserId.eq(user1.uid.clone()))
            .order_by_desc(prediction_record::Column::CreatedAt)
            .all(&db)
            .await?;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].year, 2024);
        assert_eq!(history[2].year, 2022);

        // Relation walk: sessions reachable from the user entity
        let user1_sessions = user1.find_related(Session).all(&db).await?;
        assert_eq!(user1_sessions.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let now = Utc::now();

        user::ActiveModel {
            uid: Set("uid-1".to_string()),
            email: Set("same@paddy.lk".to_string()),
            name: Set("First".to_string()),
            password_hash: Set("$argon2id$stub".to_string()),
            created_at: Set(now),
        }
        .insert(&db)
        .await?;

        let duplicate = user::ActiveModel {
            uid: Set("uid-2".to_string()),
            email: Set("same@paddy.lk".to_string()),
            name: Set("Second".to_string()),
            password_hash: Set("$argon2id$stub".to_string()),
            created_at: Set(now),
        }
        .insert(&db)
        .await;
        assert!(duplicate.is_err());

        Ok(())
    }
}
