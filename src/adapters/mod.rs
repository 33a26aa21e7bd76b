// Adapters layer: concrete implementations for external systems (Twitter HTTP API, request signing).

pub mod http;
pub mod oauth;
