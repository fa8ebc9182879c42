// Gateway module for TUI - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod app;
mod input;
mod markdown;
mod render;
mod typing;
mod ui;

// Public re-exports - the ONLY way to access TUI functionality
pub use app::{App, AppState, SessionEvent};
pub use input::{InputAction, InputHandler};
pub use markdown::parse_markdown;
pub use typing::TypingAnimation;
pub use ui::run_ui;
