// Application layer - stateful components that coordinate the domain types.
// The ledger owns accounts and the transaction log; the library owns
// documents and the store they are persisted to.

pub mod error;
mod ledger;
mod library;
mod reporting;
mod shared;
mod transaction_manager;

pub use error::*;
pub use ledger::*;
pub use library::*;
pub use reporting::*;
pub use shared::*;
pub use transaction_manager::*;
