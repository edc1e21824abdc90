pub mod auth;
pub mod battle;
pub mod caller;
pub mod favorite;
pub mod friend;
pub mod health;
pub mod oauth;
pub mod pokemon;
pub mod team;
