use sea_orm::entity::prelude::*;

/// Per-user application profile. Created lazily by onboarding rather than
/// at signup, so a user row without a profile row is a legal state.
/// `role` starts NULL and is written exactly once together with
/// `role_set_at`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    pub email: String,
    pub name: String,
    /// Lowercase role string ("farmer", "researcher", "officer", "admin").
    pub role: Option<String>,
    pub role_set_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::Uid",
        to = "super::user::Column::Uid"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
