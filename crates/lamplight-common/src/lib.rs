pub mod errors;
pub mod id;

pub use errors::{ConfigError, LamplightError};
pub use id::{new_call_id, SessionId};

pub type Result<T> = std::result::Result<T, LamplightError>;
