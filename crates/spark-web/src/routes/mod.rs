//! Route handlers.

pub mod assets;
pub mod receipts;
pub mod reviewer;
pub mod status;
