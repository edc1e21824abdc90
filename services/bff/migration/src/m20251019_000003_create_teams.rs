use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teams::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Teams::UserId).uuid().not_null())
                    .col(ColumnDef::new(Teams::TeamName).string().not_null())
                    .col(ColumnDef::new(Teams::Pokemons).json().not_null())
                    .col(
                        ColumnDef::new(Teams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teams::Table, Teams::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // list/update/delete all walk a user's teams newest-first
        manager
            .create_index(
                Index::create()
                    .table(Teams::Table)
                    .col(Teams::UserId)
                    .col(Teams::CreatedAt)
                    .name("idx_teams_user_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    UserId,
    TeamName,
    Pokemons,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
