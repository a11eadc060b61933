//! Core pipeline components
//!
//! The building blocks of the compile → connect → deploy → call pipeline:
//! configuration, solc invocation, artifact extraction, the chain client,
//! and the directory contract operations.

pub mod artifact;
pub mod chain;
pub mod compiler;
pub mod config;
pub mod directory;

pub use artifact::ContractArtifact;
pub use chain::ChainClient;
pub use compiler::Compiler;
pub use config::Settings;
pub use directory::DirectoryContract;
