/// Runtime orchestrator module - Gateway

mod non_interactive;
mod orchestrator;

pub use non_interactive::{ExecutionMetadata, NonInteractiveResult, NonInteractiveRunner, Prompt};
pub use orchestrator::{build_controller, load_documents, resolve_config, resolve_identity, Orchestrator};
