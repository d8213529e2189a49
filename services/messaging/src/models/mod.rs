//! Messaging service models

pub mod message;
pub mod user;

// Re-export for convenience
pub use message::{
    InboundMessage, Message, MessageDetail, NewMessage, OutboundMessage, ReadReceipt,
};
pub use user::{LoginCredentials, NewUser, User, UserProfile, UserSummary};
