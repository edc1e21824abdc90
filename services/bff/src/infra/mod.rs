pub mod catalog;
pub mod db;
pub mod google;
pub mod session;
