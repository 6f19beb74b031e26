// Application layer: input validation and report shaping on top of the
// in-memory ledger and price catalog.

pub mod error;
pub mod reporting;
mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
