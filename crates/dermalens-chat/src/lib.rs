//! Chat capability: prompt-forwarding glue to a hosted text-generation API.

mod client;

pub use client::{ChatClient, ChatError};
