mod catalog;
mod expense;
mod ledger;
mod money;

pub use catalog::*;
pub use expense::*;
pub use ledger::*;
pub use money::*;
