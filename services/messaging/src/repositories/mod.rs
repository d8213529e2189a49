//! Repositories for database operations

pub mod message;
pub mod user;

pub use message::MessageRepository;
pub use user::UserRepository;
