//! Route handlers organized by resource

pub mod health;
pub mod posts;
pub mod comments;
pub mod hello;
