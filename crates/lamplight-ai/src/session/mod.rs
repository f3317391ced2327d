//! Conversation session management.
//!
//! A `Session` owns the transcript, the generation settings and the tool
//! registry, and runs the tool-call loop for each user turn. A turn is
//! committed to the transcript only once the final reply arrives; a failed,
//! timed-out or cancelled turn leaves the transcript as it was.

mod chat;
mod manager;
mod types;


pub use manager::Session;
pub use types::{FunctionChoice, RetryPolicy};
