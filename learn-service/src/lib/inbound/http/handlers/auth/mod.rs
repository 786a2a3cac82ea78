pub mod api_key;
pub mod login;
pub mod me;
pub mod register;
