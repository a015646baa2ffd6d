pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod storage;

pub use application::{Ledger, Library, SharedLedger};
pub use domain::*;
