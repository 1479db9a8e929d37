// Domain-specific error types
pub mod errors;

// Port interfaces
pub mod ports;

// Invocation report and wire response
pub mod report;

// Core inventory and metric types
pub mod types;
