pub mod content;
pub mod user;
