pub mod config;
pub use config::StoreConfig;

pub mod errors;
pub use errors::StoreError;

pub mod models;
pub mod db;

pub mod store;
pub use store::MembershipStore;

// Command line front-end
pub mod cli;
pub mod commands;
pub mod formatting;
