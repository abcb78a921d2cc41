use sea_orm::entity::prelude::*;

/// A registered account holder. The `uid` is a UUID string minted at
/// signup and is the identifier the frontend persists and displays.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    /// Argon2id PHC string, never the raw password.
    pub password_hash: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::session::Entity")]
    Session,
    #[sea_orm(has_one = "super::profile::Entity")]
    Profile,
    #[sea_orm(has_many = "super::prediction_record::Entity")]
    PredictionRecord,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::prediction_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PredictionRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
