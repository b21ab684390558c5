pub mod config;
pub mod logging;

// Pipeline stages, leaf-first.
pub mod api;
pub mod batch;
pub mod checksum;
pub mod codegen;
pub mod error;
pub mod fetch;
pub mod naming;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod resolve;
pub mod retry;
pub mod storage;
pub mod tree;
