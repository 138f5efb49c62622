// Adapters layer: concrete implementations of the storage ports. The
// in-memory backend doubles as the test double and the CLI's working state.

pub mod memory;
