pub mod auth;
pub mod catalog;
pub mod favorite;
pub mod friend;
pub mod oauth;
pub mod team;
pub mod user;
