// Shared domain types: produced by the github layer, accumulated by the
// engine and flattened by the response assembler.

pub mod pr;

pub use pr::*;
