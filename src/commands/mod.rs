mod members;
pub use members::*;

mod memberships;
pub use memberships::*;

mod deposits;
pub use deposits::*;
