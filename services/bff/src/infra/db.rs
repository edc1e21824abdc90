use std::time::Duration;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, Database,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel as _,
    QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait, sea_query::OnConflict,
};
use sea_orm_migration::MigratorTrait as _;
use uuid::Uuid;

use pokedex_bff_migration::Migrator;
use pokedex_bff_schema::{favorites, friends, teams, users};

use crate::config::DatabaseSettings;
use crate::domain::repository::{
    FavoriteRepository, FriendRepository, TeamRepository, UserRepository,
};
use crate::domain::types::{
    Favorite, Friend, PokemonSummary, Team, TeamInput, TeamMember, User,
};
use crate::error::BffError;

// ── Pool ─────────────────────────────────────────────────────────────────────

/// Open the connection pool and bring the schema up to date.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(settings.url()?);
    options
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("connect to database")?;
    Migrator::up(&db, None).await.context("run migrations")?;
    Ok(db)
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BffError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<User>, BffError> {
        let model = users::Entity::find()
            .filter(users::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find user by code")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), BffError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password: Set(user.password_hash.clone()),
            name: Set(user.name.clone()),
            code: Set(user.code.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                // Email and code are both unique; constraint names differ per backend.
                if self.find_by_email(&user.email).await?.is_some() {
                    Err(BffError::UserAlreadyExists)
                } else {
                    Err(BffError::FriendCodeTaken)
                }
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        password_hash: model.password,
        code: model.code,
        created_at: model.created_at,
    }
}

// ── Favorite repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavoriteRepository {
    pub db: DatabaseConnection,
}

impl FavoriteRepository for DbFavoriteRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Favorite>, BffError> {
        let models = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .order_by_asc(favorites::Column::CreatedAt)
            .order_by_asc(favorites::Column::PokemonId)
            .all(&self.db)
            .await
            .context("list favorites")?;
        models.into_iter().map(favorite_from_model).collect()
    }

    async fn add(
        &self,
        user_id: Uuid,
        pokemon: &PokemonSummary,
    ) -> Result<Option<Favorite>, BffError> {
        let favorite = Favorite {
            user_id,
            pokemon_id: pokemon.id,
            name: pokemon.name.clone(),
            sprite: pokemon.sprite.clone(),
            types: pokemon.types.clone(),
            created_at: Utc::now(),
        };
        let types = serde_json::to_value(&favorite.types).context("encode favorite types")?;
        let inserted = favorites::Entity::insert(favorites::ActiveModel {
            user_id: Set(favorite.user_id),
            pokemon_id: Set(favorite.pokemon_id),
            pokemon_name: Set(favorite.name.clone()),
            pokemon_sprite: Set(favorite.sprite.clone()),
            pokemon_types: Set(types),
            created_at: Set(favorite.created_at),
        })
        .on_conflict(
            OnConflict::columns([favorites::Column::UserId, favorites::Column::PokemonId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("insert favorite")?;
        Ok((inserted > 0).then_some(favorite))
    }

    async fn remove(&self, user_id: Uuid, pokemon_id: i32) -> Result<bool, BffError> {
        let result = favorites::Entity::delete_many()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::PokemonId.eq(pokemon_id))
            .exec(&self.db)
            .await
            .context("delete favorite")?;
        Ok(result.rows_affected > 0)
    }
}

fn favorite_from_model(model: favorites::Model) -> Result<Favorite, BffError> {
    let types: Vec<String> =
        serde_json::from_value(model.pokemon_types).context("decode favorite types")?;
    Ok(Favorite {
        user_id: model.user_id,
        pokemon_id: model.pokemon_id,
        name: model.pokemon_name,
        sprite: model.pokemon_sprite,
        types,
        created_at: model.created_at,
    })
}

// ── Team repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTeamRepository {
    pub db: DatabaseConnection,
}

impl DbTeamRepository {
    /// Teams of `user_id` in listing order.
    fn ordered(user_id: Uuid) -> sea_orm::Select<teams::Entity> {
        teams::Entity::find()
            .filter(teams::Column::UserId.eq(user_id))
            .order_by_desc(teams::Column::CreatedAt)
            .order_by_desc(teams::Column::Id)
    }

    async fn find_at(&self, user_id: Uuid, index: u64) -> Result<Option<teams::Model>, BffError> {
        // The driver binds offsets as i64; anything larger is past the end of any list.
        if i64::try_from(index).is_err() {
            return Ok(None);
        }
        let model = Self::ordered(user_id)
            .offset(index)
            .one(&self.db)
            .await
            .context("find team by index")?;
        Ok(model)
    }

    async fn find_owned(
        &self,
        user_id: Uuid,
        team_id: Uuid,
    ) -> Result<Option<teams::Model>, BffError> {
        let model = teams::Entity::find_by_id(team_id)
            .filter(teams::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find team by id")?;
        Ok(model)
    }

    async fn apply(&self, model: teams::Model, data: &TeamInput) -> Result<Team, BffError> {
        let pokemons = serde_json::to_value(&data.pokemons).context("encode team pokemons")?;
        let mut am = model.into_active_model();
        am.team_name = Set(data.name.clone());
        am.pokemons = Set(pokemons);
        let updated = am.update(&self.db).await.context("update team")?;
        team_from_model(updated)
    }
}

impl TeamRepository for DbTeamRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Team>, BffError> {
        let models = Self::ordered(user_id)
            .all(&self.db)
            .await
            .context("list teams")?;
        models.into_iter().map(team_from_model).collect()
    }

    async fn create(&self, team: &Team) -> Result<(), BffError> {
        let pokemons = serde_json::to_value(&team.pokemons).context("encode team pokemons")?;
        teams::ActiveModel {
            id: Set(team.id),
            user_id: Set(team.user_id),
            team_name: Set(team.name.clone()),
            pokemons: Set(pokemons),
            created_at: Set(team.created_at),
        }
        .insert(&self.db)
        .await
        .context("create team")?;
        Ok(())
    }

    async fn update_at(
        &self,
        user_id: Uuid,
        index: u64,
        data: &TeamInput,
    ) -> Result<Option<Team>, BffError> {
        match self.find_at(user_id, index).await? {
            Some(model) => Ok(Some(self.apply(model, data).await?)),
            None => Ok(None),
        }
    }

    async fn delete_at(&self, user_id: Uuid, index: u64) -> Result<bool, BffError> {
        let Some(model) = self.find_at(user_id, index).await? else {
            return Ok(false);
        };
        let result = teams::Entity::delete_by_id(model.id)
            .exec(&self.db)
            .await
            .context("delete team by index")?;
        Ok(result.rows_affected > 0)
    }

    async fn update(
        &self,
        user_id: Uuid,
        team_id: Uuid,
        data: &TeamInput,
    ) -> Result<Option<Team>, BffError> {
        match self.find_owned(user_id, team_id).await? {
            Some(model) => Ok(Some(self.apply(model, data).await?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, user_id: Uuid, team_id: Uuid) -> Result<bool, BffError> {
        let result = teams::Entity::delete_many()
            .filter(teams::Column::Id.eq(team_id))
            .filter(teams::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete team")?;
        Ok(result.rows_affected > 0)
    }
}

fn team_from_model(model: teams::Model) -> Result<Team, BffError> {
    let pokemons: Vec<TeamMember> =
        serde_json::from_value(model.pokemons).context("decode team pokemons")?;
    Ok(Team {
        id: model.id,
        user_id: model.user_id,
        name: model.team_name,
        pokemons,
        created_at: model.created_at,
    })
}

// ── Friend repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFriendRepository {
    pub db: DatabaseConnection,
}

impl FriendRepository for DbFriendRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Friend>, BffError> {
        let rows = friends::Entity::find()
            .filter(friends::Column::UserId.eq(user_id))
            .order_by_asc(friends::Column::CreatedAt)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .context("list friends")?;
        Ok(rows
            .into_iter()
            .filter_map(|(link, user)| {
                user.map(|u| Friend {
                    user_id: u.id,
                    email: u.email,
                    name: u.name,
                    code: u.code,
                    since: link.created_at,
                })
            })
            .collect())
    }

    async fn add(&self, user_id: Uuid, friend_id: Uuid) -> Result<(), BffError> {
        let now = Utc::now();
        self.db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    insert_link(txn, user_id, friend_id, now).await?;
                    insert_link(txn, friend_id, user_id, now).await?;
                    Ok(())
                })
            })
            .await
            .context("add friend")?;
        Ok(())
    }
}

async fn insert_link(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    friend_id: Uuid,
    created_at: DateTime<Utc>,
) -> Result<(), DbErr> {
    friends::Entity::insert(friends::ActiveModel {
        user_id: Set(user_id),
        friend_id: Set(friend_id),
        created_at: Set(created_at),
    })
    .on_conflict(
        OnConflict::columns([friends::Column::UserId, friends::Column::FriendId])
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(txn)
    .await?;
    Ok(())
}
