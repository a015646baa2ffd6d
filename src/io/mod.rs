mod export;
mod script;

pub use export::*;
pub use script::*;
