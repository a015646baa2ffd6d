mod account;
mod document;
mod money;
mod transaction;

pub use account::*;
pub use document::*;
pub use money::*;
pub use transaction::*;
