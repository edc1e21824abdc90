use sea_orm::entity::prelude::*;

/// One direction of a friendship. Rows are always written in pairs.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "friends")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub friend_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FriendId",
        to = "super::users::Column::Id"
    )]
    Friend,
}

// Joins resolve to the befriended user, not the owner.
impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Friend.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
