mod client;
mod engine;

pub use client::SerpClient;
pub use engine::{Engine, EngineSelection};
