//! Scripted conversations that show how the transcript works.

use std::io::Write;

use lamplight_ai::{AiClient, Role, Session, Transcript};
use lamplight_common::LamplightError;

use super::ai_error;

pub const FIRST_QUESTION: &str = "Hello, can you explain in under 100 words, what is GitHub?";
pub const FOLLOW_UP: &str = "Can you summarize your previous response in under 20 words?";

/// Ask a question, then one that only makes sense with the first answer in
/// context, and dump the resulting history.
pub async fn followup<W: Write>(
    session: &mut Session,
    client: &dyn AiClient,
    out: &mut W,
) -> Result<(), LamplightError> {
    let reply = session.chat(client, FIRST_QUESTION).await.map_err(ai_error)?;
    writeln!(out, "Question: {FIRST_QUESTION}\n{reply}\n")?;

    let reply = session.chat(client, FOLLOW_UP).await.map_err(ai_error)?;
    writeln!(out, "Follow-up: {FOLLOW_UP}\n{reply}\n")?;

    writeln!(out, "Chat messages:")?;
    for message in session.transcript() {
        writeln!(out, "Role: {}, Content: {}", message.role, message.text())?;
    }
    Ok(())
}

/// One message per role, two of them with author names.
pub fn seeded_transcript() -> Result<Transcript, LamplightError> {
    let mut transcript = Transcript::new();
    transcript
        .append(Role::System, "You are a helpful assistant", None)
        .map_err(ai_error)?;
    transcript
        .append(
            Role::Assistant,
            "We have pizza, pasta, and salad available to order. What would you like to order?",
            Some("Restaurant Assistant"),
        )
        .map_err(ai_error)?;
    transcript
        .append(
            Role::User,
            "I'd like to have the first option, please.",
            Some("Ema Vargova"),
        )
        .map_err(ai_error)?;
    Ok(transcript)
}

pub fn roles<W: Write>(out: &mut W) -> Result<(), LamplightError> {
    let transcript = seeded_transcript()?;
    for message in transcript.all() {
        writeln!(out, "Message: {}", message.text())?;
        match message.author_name {
            Some(ref name) => writeln!(out, "Role: {} ({name})\n", message.role)?,
            None => writeln!(out, "Role: {}\n", message.role)?,
        }
    }
    Ok(())
}
