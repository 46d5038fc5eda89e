// Operations
mod operations;
pub use operations::*;

// Models
mod members;
pub use members::*;

mod memberships;
pub use memberships::*;

mod deposits;
pub use deposits::*;

mod statistics;
pub use statistics::*;
