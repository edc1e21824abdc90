use sea_orm_migration::prelude::*;

mod m20251019_000001_create_users;
mod m20251019_000002_create_favorites;
mod m20251019_000003_create_teams;
mod m20251019_000004_create_friends;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251019_000001_create_users::Migration),
            Box::new(m20251019_000002_create_favorites::Migration),
            Box::new(m20251019_000003_create_teams::Migration),
            Box::new(m20251019_000004_create_friends::Migration),
        ]
    }
}
