pub mod connection;
pub use connection::Connection;

pub mod results;
pub use results::QueryError;

// Schema
pub mod schema;

// Models
mod members;
mod memberships;
mod deposits;
