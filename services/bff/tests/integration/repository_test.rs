use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

use pokedex_bff::domain::repository::{
    FavoriteRepository, FriendRepository, TeamRepository, UserRepository,
};
use pokedex_bff::error::BffError;
use pokedex_bff::infra::db::{
    DbFavoriteRepository, DbFriendRepository, DbTeamRepository, DbUserRepository,
};
use pokedex_bff::usecase::team::CreateTeamUseCase;
use pokedex_bff_schema::{favorites, friends};
use pokedex_testing::db::test_database;

use crate::helpers::{member, pokemon, team_input, test_user};

async fn seeded_user(db: &sea_orm::DatabaseConnection, email: &str, code: &str) -> Uuid {
    let user = test_user(email, code);
    DbUserRepository { db: db.clone() }
        .create(&user)
        .await
        .unwrap();
    user.id
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_and_find_user_by_email_and_code() {
    let repo = DbUserRepository {
        db: test_database().await,
    };
    let user = test_user("ash@pallet.town", "ash0001");
    repo.create(&user).await.unwrap();

    let by_email = repo.find_by_email("ash@pallet.town").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
    assert_eq!(by_email.password_hash, user.password_hash);

    let by_code = repo.find_by_code("ash0001").await.unwrap().unwrap();
    assert_eq!(by_code.email, "ash@pallet.town");

    assert!(repo.find_by_email("nobody@x.io").await.unwrap().is_none());
}

#[tokio::test]
async fn should_map_duplicate_email_to_user_already_exists() {
    let repo = DbUserRepository {
        db: test_database().await,
    };
    repo.create(&test_user("ash@pallet.town", "ash0001"))
        .await
        .unwrap();

    let result = repo.create(&test_user("ash@pallet.town", "ash0002")).await;
    assert!(
        matches!(result, Err(BffError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_tell_code_collision_from_duplicate_email() {
    let repo = DbUserRepository {
        db: test_database().await,
    };
    repo.create(&test_user("ash@pallet.town", "ash0001"))
        .await
        .unwrap();

    let result = repo.create(&test_user("misty@cerulean.gym", "ash0001")).await;
    assert!(
        matches!(result, Err(BffError::FriendCodeTaken)),
        "expected FriendCodeTaken, got {result:?}"
    );
    assert!(repo.find_by_email("misty@cerulean.gym").await.unwrap().is_none());
}

// ── Favorites ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_single_row_for_repeated_favorite() {
    let db = test_database().await;
    let repo = DbFavoriteRepository { db: db.clone() };
    let user_id = seeded_user(&db, "ash@pallet.town", "ash0001").await;

    let first = repo.add(user_id, &pokemon(25, "pikachu")).await.unwrap();
    let second = repo.add(user_id, &pokemon(25, "pikachu")).await.unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(favorites::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_round_trip_favorite_types() {
    let db = test_database().await;
    let repo = DbFavoriteRepository { db: db.clone() };
    let user_id = seeded_user(&db, "ash@pallet.town", "ash0001").await;
    let mut bulbasaur = pokemon(1, "bulbasaur");
    bulbasaur.types = vec!["grass".to_owned(), "poison".to_owned()];
    repo.add(user_id, &bulbasaur).await.unwrap();

    let favorites = repo.list(user_id).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].types, ["grass", "poison"]);
    assert_eq!(favorites[0].sprite, bulbasaur.sprite);
}

#[tokio::test]
async fn should_remove_favorite() {
    let db = test_database().await;
    let repo = DbFavoriteRepository { db: db.clone() };
    let user_id = seeded_user(&db, "ash@pallet.town", "ash0001").await;
    repo.add(user_id, &pokemon(4, "charmander")).await.unwrap();

    assert!(repo.remove(user_id, 4).await.unwrap());
    assert!(!repo.remove(user_id, 4).await.unwrap());
    assert!(repo.list(user_id).await.unwrap().is_empty());
}

// ── Teams ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_address_teams_by_listing_position() {
    let db = test_database().await;
    let repo = DbTeamRepository { db: db.clone() };
    let user_id = seeded_user(&db, "ash@pallet.town", "ash0001").await;
    let create = CreateTeamUseCase { repo: repo.clone() };
    create.execute(user_id, team_input("A", vec![])).await.unwrap();
    let teams = create.execute(user_id, team_input("B", vec![])).await.unwrap();
    let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["B", "A"]);

    let updated = repo
        .update_at(user_id, 0, &team_input("B2", vec![member(7, "squirtle")]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, teams[0].id);

    let teams = repo.list(user_id).await.unwrap();
    assert_eq!(teams[0].name, "B2");
    assert_eq!(teams[0].pokemons, vec![member(7, "squirtle")]);
    assert_eq!(teams[1].name, "A");
}

#[tokio::test]
async fn should_return_none_past_end_of_teams() {
    let db = test_database().await;
    let repo = DbTeamRepository { db: db.clone() };
    let user_id = seeded_user(&db, "ash@pallet.town", "ash0001").await;
    CreateTeamUseCase { repo: repo.clone() }
        .execute(user_id, team_input("A", vec![]))
        .await
        .unwrap();

    assert!(
        repo.update_at(user_id, 1, &team_input("X", vec![]))
            .await
            .unwrap()
            .is_none()
    );
    assert!(!repo.delete_at(user_id, 1).await.unwrap());
    for index in [i64::MAX as u64 + 1, u64::MAX] {
        assert!(!repo.delete_at(user_id, index).await.unwrap());
        assert!(
            repo.update_at(user_id, index, &team_input("X", vec![]))
                .await
                .unwrap()
                .is_none()
        );
    }
    assert!(repo.delete_at(user_id, 0).await.unwrap());
    assert!(repo.list(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_scope_stable_id_edits_to_owner() {
    let db = test_database().await;
    let repo = DbTeamRepository { db: db.clone() };
    let owner = seeded_user(&db, "ash@pallet.town", "ash0001").await;
    let teams = CreateTeamUseCase { repo: repo.clone() }
        .execute(owner, team_input("A", vec![]))
        .await
        .unwrap();
    let team_id = teams[0].id;

    let intruder = seeded_user(&db, "gary@pallet.town", "gary001").await;
    assert!(
        repo.update(intruder, team_id, &team_input("X", vec![]))
            .await
            .unwrap()
            .is_none()
    );
    assert!(!repo.delete(intruder, team_id).await.unwrap());

    let renamed = repo
        .update(owner, team_id, &team_input("A2", vec![]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "A2");
    assert!(repo.delete(owner, team_id).await.unwrap());
}

#[tokio::test]
async fn should_store_team_members_verbatim() {
    let db = test_database().await;
    let repo = DbTeamRepository { db: db.clone() };
    let user_id = seeded_user(&db, "ash@pallet.town", "ash0001").await;
    let mew = serde_json::json!({
        "id": 151,
        "name": "mew",
        "types": [{ "slot": 1, "type": { "name": "psychic" } }],
        "stats": [{ "base_stat": 100, "stat": { "name": "hp" } }],
        "nickname": "Mewy",
    });
    let missingno = serde_json::json!({ "name": "missingno" });
    CreateTeamUseCase { repo: repo.clone() }
        .execute(
            user_id,
            team_input("Legends", vec![mew.clone(), missingno.clone()]),
        )
        .await
        .unwrap();

    let teams = repo.list(user_id).await.unwrap();
    assert_eq!(teams[0].pokemons, vec![mew, missingno]);
}

// ── Friends ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_link_friends_in_both_directions() {
    let db = test_database().await;
    let users = DbUserRepository { db: db.clone() };
    let ash = test_user("ash@pallet.town", "ash0001");
    let misty = test_user("misty@cerulean.gym", "misty01");
    users.create(&ash).await.unwrap();
    users.create(&misty).await.unwrap();

    let repo = DbFriendRepository { db: db.clone() };
    repo.add(ash.id, misty.id).await.unwrap();
    repo.add(ash.id, misty.id).await.unwrap();
    repo.add(misty.id, ash.id).await.unwrap();

    assert_eq!(friends::Entity::find().count(&db).await.unwrap(), 2);

    let ash_friends = repo.list(ash.id).await.unwrap();
    assert_eq!(ash_friends.len(), 1);
    assert_eq!(ash_friends[0].email, "misty@cerulean.gym");
    assert_eq!(ash_friends[0].code, "misty01");

    let misty_friends = repo.list(misty.id).await.unwrap();
    assert_eq!(misty_friends.len(), 1);
    assert_eq!(misty_friends[0].user_id, ash.id);
}
