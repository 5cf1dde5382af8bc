//! Interactive terminal session over a [`PostsController`].

use std::io::Write;

use anyhow::Result;
use client_core::{Effect, PostsController, View};
use shared::domain::{PostField, PostId};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::render_text;

const HELP: &str = "commands: title <text> | body <text> | submit | edit <id> | cancel | delete <id> | dismiss | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    SetField(PostField, String),
    Submit,
    Edit(PostId),
    Cancel,
    Delete(PostId),
    Dismiss,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let id = || -> Result<PostId, String> {
        if rest.is_empty() {
            return Err(format!("'{word}' needs a post id"));
        }
        rest.parse::<PostId>().map_err(|never| match never {})
    };

    match word.to_ascii_lowercase().as_str() {
        "title" | "body" => {
            let field = word.parse::<PostField>()?;
            Ok(SessionCommand::SetField(field, rest.to_string()))
        }
        "submit" | "add" | "update" => Ok(SessionCommand::Submit),
        "edit" => id().map(SessionCommand::Edit),
        "cancel" => Ok(SessionCommand::Cancel),
        "delete" => id().map(SessionCommand::Delete),
        "dismiss" => Ok(SessionCommand::Dismiss),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command '{other}'")),
    }
}

/// Input typed at the focused title prompt. Only a lone command keyword runs
/// as a command; any other text becomes the title verbatim.
pub fn parse_focused_title(line: &str) -> Result<SessionCommand, String> {
    let text = line.trim();
    if !text.contains(char::is_whitespace) {
        if let Ok(command) = parse_command(text) {
            return Ok(command);
        }
    }
    if text.is_empty() {
        return Err("empty command".to_string());
    }
    Ok(SessionCommand::SetField(PostField::Title, text.to_string()))
}

/// Loads the posts, then reads commands until `quit` or end of input,
/// re-rendering the view after each one.
pub async fn run_session<R, W>(
    controller: &mut PostsController,
    input: R,
    output: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{}", render_text(&controller.view())?)?;
    let effects = controller.fetch_all().await;
    let mut focus_title = wants_title_focus(&effects);
    write!(output, "{}", render_text(&controller.view())?)?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", if focus_title { "title> " } else { "> " })?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if matches!(controller.view(), View::Error { .. } | View::Loading { .. }) {
            if matches!(parse_command(&line), Ok(SessionCommand::Quit)) {
                break;
            }
            writeln!(output, "posts are unavailable; type quit to leave")?;
            continue;
        }

        let parsed = if focus_title {
            parse_focused_title(&line)
        } else {
            parse_command(&line)
        };
        let command = match parsed {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{message}; type help for commands")?;
                continue;
            }
        };
        focus_title = false;

        let effects = match command {
            SessionCommand::SetField(field, value) => controller.set_field(field, value),
            SessionCommand::Submit => controller.submit().await,
            SessionCommand::Edit(id) => controller.begin_edit(&id),
            SessionCommand::Cancel => controller.cancel_edit(),
            SessionCommand::Delete(id) => controller.delete(&id).await,
            SessionCommand::Dismiss => controller.dismiss_notice(),
            SessionCommand::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            SessionCommand::Quit => break,
        };
        focus_title = wants_title_focus(&effects);
        write!(output, "{}", render_text(&controller.view())?)?;
    }

    writeln!(output)?;
    Ok(())
}

fn wants_title_focus(effects: &[Effect]) -> bool {
    effects.iter().any(|effect| matches!(effect, Effect::FocusTitle))
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
