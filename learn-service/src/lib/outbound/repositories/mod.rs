pub mod content;
pub mod user;

pub use content::PostgresContentRepository;
pub use user::PostgresUserRepository;
