//! Document state and logic (UI-agnostic).

mod ops;
mod state;
mod view;

pub use ops::Format;
pub use state::Document;
