//! Append-only conversation transcript.
//!
//! Messages are validated on the way in and never change or move once
//! stored. Iteration borrows the transcript, so an iterator always sees the
//! messages that existed when it was created.

use std::slice;

use crate::message::{Message, Role};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    #[error("invalid role '{0}': expected system, user, assistant or tool")]
    InvalidRole(String),
    #[error("message content is empty")]
    EmptyContent,
    #[error("index {index} out of range for transcript of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text message.
    pub fn append(
        &mut self,
        role: Role,
        text: impl Into<String>,
        author_name: Option<&str>,
    ) -> Result<&Message, TranscriptError> {
        let mut message = Message::new(role, text);
        message.author_name = author_name.map(str::to_string);
        self.push(message)
    }

    /// Append a text message whose role is given by name (e.g. from a
    /// config file).
    pub fn append_parsed(
        &mut self,
        role: &str,
        text: impl Into<String>,
        author_name: Option<&str>,
    ) -> Result<&Message, TranscriptError> {
        let role: Role = role.parse()?;
        self.append(role, text, author_name)
    }

    /// Append a fully built message.
    pub fn push(&mut self, message: Message) -> Result<&Message, TranscriptError> {
        validate(&message)?;
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Append every message or none of them.
    pub fn extend_atomic(&mut self, messages: Vec<Message>) -> Result<(), TranscriptError> {
        messages.iter().try_for_each(validate)?;
        self.messages.extend(messages);
        Ok(())
    }

    pub fn add_system_message(&mut self, text: impl Into<String>) -> Result<&Message, TranscriptError> {
        self.append(Role::System, text, None)
    }

    pub fn add_user_message(&mut self, text: impl Into<String>) -> Result<&Message, TranscriptError> {
        self.append(Role::User, text, None)
    }

    pub fn add_assistant_message(
        &mut self,
        text: impl Into<String>,
    ) -> Result<&Message, TranscriptError> {
        self.append(Role::Assistant, text, None)
    }

    /// Messages in insertion order. The iterator is `Clone`, so it can be
    /// restarted from any point.
    pub fn all(&self) -> slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn at(&self, index: usize) -> Result<&Message, TranscriptError> {
        self.messages
            .get(index)
            .ok_or(TranscriptError::IndexOutOfRange {
                index,
                len: self.messages.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}

fn validate(message: &Message) -> Result<(), TranscriptError> {
    if message.has_content() {
        Ok(())
    } else {
        Err(TranscriptError::EmptyContent)
    }
}
