// Inventory hygiene checks
pub mod checks;

// Invocation contract (trigger event -> response)
pub mod handler;

// Suite orchestration and metric publication
pub mod orchestrator;
