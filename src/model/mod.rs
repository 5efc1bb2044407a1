//! Pure data structures shared by the ledger, the provider and the store actor.

pub mod interaction;
pub mod item;
pub mod transaction;

pub use interaction::*;
pub use item::*;
pub use transaction::*;
