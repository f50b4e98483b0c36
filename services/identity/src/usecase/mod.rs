pub mod issue;
pub mod login;
pub mod register;
pub mod token;
