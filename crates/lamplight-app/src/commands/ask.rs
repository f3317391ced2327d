//! One-shot question, optionally with an image and streamed output.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use lamplight_ai::{AiClient, ImageRef, Message, Session};
use lamplight_common::LamplightError;

use super::ai_error;

pub async fn run<W: Write + Send>(
    session: &mut Session,
    client: &dyn AiClient,
    prompt: &str,
    image: Option<&Path>,
    stream: bool,
    out: &mut W,
) -> Result<(), LamplightError> {
    let mut message = Message::user(prompt);
    if let Some(path) = image {
        message = message.with_image(ImageRef::Path(path.to_path_buf()));
    }

    if !stream {
        let reply = session.chat_message(client, message).await.map_err(ai_error)?;
        writeln!(out, "{reply}")?;
        return Ok(());
    }

    // The first write error stops output and is reported after the turn.
    let sink = Mutex::new((&mut *out, None::<io::Error>));
    let on_chunk = |chunk: String| {
        let Ok(mut guard) = sink.lock() else { return };
        let (out, failed) = &mut *guard;
        if failed.is_none() {
            if let Err(e) = write!(out, "{chunk}").and_then(|()| out.flush()) {
                *failed = Some(e);
            }
        }
    };
    session
        .chat_streaming(client, message, &on_chunk)
        .await
        .map_err(ai_error)?;

    let (out, failed) = sink
        .into_inner()
        .map_err(|_| io::Error::other("stream writer lock poisoned"))?;
    if let Some(e) = failed {
        return Err(e.into());
    }
    writeln!(out)?;
    Ok(())
}
