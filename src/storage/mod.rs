mod disk;
mod memory;
mod store;

pub use disk::*;
pub use memory::*;
pub use store::*;
