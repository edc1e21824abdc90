//! In-memory SQLite database with the BFF tables.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, EntityTrait, Schema};

use pokedex_bff_schema::{favorites, friends, teams, users};

/// Connect to a fresh `sqlite::memory:` database and create every BFF table.
///
/// Tables are created in foreign-key order. Panics on failure since a broken
/// fixture makes the calling test meaningless.
pub async fn test_database() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    create_table(&db, users::Entity).await;
    create_table(&db, favorites::Entity).await;
    create_table(&db, teams::Entity).await;
    create_table(&db, friends::Entity).await;
    db
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) {
    let schema = Schema::new(DbBackend::Sqlite);
    let stmt = schema.create_table_from_entity(entity);
    db.execute(db.get_database_backend().build(&stmt))
        .await
        .expect("create test table");
}
