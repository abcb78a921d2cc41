pub mod auth;
pub mod health;
pub mod prediction;
pub mod profiles;
