pub mod classifier;
pub mod client;
pub mod download;
pub mod relay;
pub mod utils;
