//! Subcommand implementations.

pub mod ask;
pub mod chat;
pub mod demos;


use lamplight_ai::AiError;
use lamplight_common::LamplightError;

pub(crate) fn ai_error(e: impl Into<AiError>) -> LamplightError {
    LamplightError::Ai(e.into().to_string())
}
