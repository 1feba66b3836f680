//! HTTP handlers.

pub mod channels;
pub mod export;
pub mod health;
pub mod preflight;

pub use channels::list_channels;
pub use export::generate_export;
pub use health::{health, ready};
pub use preflight::get_preflight;
