//! sea-orm entities for the BFF's relational store.

pub mod favorites;
pub mod friends;
pub mod teams;
pub mod users;
