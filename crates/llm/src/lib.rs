//! Language model provider abstraction.
//!
//! One completion interface serves both question routing and answer
//! generation; concrete providers live under [`providers`].

pub mod client;
pub mod factory;
pub mod providers;

pub use client::{LlmClient, LlmRequest, LlmResponse};
pub use factory::create_client;
