//! The interactive `User > ` / `Assistant > ` loop.

use std::io::Write;

use lamplight_ai::{AiClient, AiError, Message, Session};
use lamplight_common::LamplightError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Typing this on its own line ends the session.
pub const EXIT_COMMAND: &str = "exit";

/// Read lines from `input` until `exit` or end of input, answering each one.
///
/// Ctrl-C while a reply is pending cancels that turn only; at the prompt it
/// ends the loop like `exit`.
pub async fn run<R, W>(
    session: &mut Session,
    client: &dyn AiClient,
    input: R,
    out: &mut W,
) -> Result<(), LamplightError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "User > ")?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            Ok(()) = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            writeln!(out)?;
            break;
        };

        let text = line.trim();
        if text == EXIT_COMMAND {
            break;
        }
        if text.is_empty() {
            continue;
        }

        let cancel = CancellationToken::new();
        let turn = session.chat_cancellable(client, Message::user(text), &cancel);
        tokio::pin!(turn);
        let result = loop {
            tokio::select! {
                result = &mut turn => break result,
                Ok(()) = tokio::signal::ctrl_c() => cancel.cancel(),
            }
        };

        match result {
            Ok(reply) => writeln!(out, "Assistant > {reply}")?,
            Err(AiError::Cancelled) => writeln!(out, "\n(cancelled)")?,
            Err(e) => {
                warn!(error = %e, "Turn failed");
                writeln!(out, "Error: {e}")?;
            }
        }
    }

    info!(messages = session.transcript().len(), usage = %session.tracker(), "Chat ended");
    Ok(())
}
