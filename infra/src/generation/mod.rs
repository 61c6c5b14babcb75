//! Remote image synthesis over HTTP
//!
//! - [`DashScopeClient`] submits tasks, polls them and reads their results
//! - [`HttpArtifactFetcher`] downloads the produced images

pub mod dashscope;
pub mod http_fetcher;
pub mod wire;

#[cfg(test)]
mod tests;

pub use dashscope::DashScopeClient;
pub use http_fetcher::HttpArtifactFetcher;
