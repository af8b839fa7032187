//! HTTP wire surface: the chat endpoint and its operational siblings.

pub mod chat;
pub mod health;
pub mod session;
pub mod sse;
pub mod types;
pub mod verify;
pub mod video;
