pub mod config;
pub mod gemini_client;
pub mod state_store;
