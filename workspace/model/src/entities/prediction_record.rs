use sea_orm::entity::prelude::*;

/// One forecast served to an authenticated user. Anonymous predictions
/// are not recorded. Feeds the dashboard's recent-activity list.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "prediction_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub year: i32,
    /// "Maha" or "Yala".
    pub season: String,
    /// Canonical uppercase district spelling.
    pub district: String,
    pub sown_hect: f64,
    pub previous_yield: f64,
    pub previous_production: f64,
    pub predicted_extent: f64,
    pub predicted_production: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
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
