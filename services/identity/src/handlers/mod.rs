pub mod health;
pub mod login;
pub mod register;
pub mod resource;
