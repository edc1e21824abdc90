pub mod battle;
pub mod repository;
pub mod types;
