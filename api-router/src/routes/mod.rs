pub mod auth;
pub mod chat;
pub mod comments;
pub mod messages;
pub mod probes;
