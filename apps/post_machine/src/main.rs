use std::{io::Write, sync::Arc};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, HttpPostsApi, PostsController, View};
use shared::domain::{PostField, PostId};
use tracing_subscriber::EnvFilter;

mod render;
mod session;

use render::render_text;

#[derive(Parser, Debug)]
#[command(name = "post_machine", about = "Create, edit, and delete posts on a REST collection")]
struct Args {
    /// Posts collection endpoint, e.g. http://localhost:3000/posts
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every post
    List,
    /// Create a post
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Replace the title and/or body of a post
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete a post
    Delete { id: String },
    /// Interactive session (default)
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = timeout_secs;
    }
    let api = HttpPostsApi::from_settings(&settings)?;
    tracing::debug!(endpoint = %api.endpoint(), "using posts collection");
    let mut controller = PostsController::new(Arc::new(api));

    let command = args.command.unwrap_or(Command::Session);
    if let Command::Session = command {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        return session::run_session(&mut controller, stdin, &mut stdout).await;
    }

    controller.fetch_all().await;
    if !matches!(controller.view(), View::Error { .. }) {
        match command {
            Command::List | Command::Session => {}
            Command::Add { title, body } => {
                controller.set_field(PostField::Title, title);
                controller.set_field(PostField::Body, body);
                controller.submit().await;
            }
            Command::Edit { id, title, body } => {
                let id = parse_id(&id);
                if controller.begin_edit(&id).is_empty() {
                    return Err(anyhow!("post {id} not found"));
                }
                if let Some(title) = title {
                    controller.set_field(PostField::Title, title);
                }
                if let Some(body) = body {
                    controller.set_field(PostField::Body, body);
                }
                controller.submit().await;
            }
            Command::Delete { id } => {
                controller.delete(&parse_id(&id)).await;
            }
        }
    }

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", render_text(&controller.view())?)?;
    stdout.flush()?;

    outcome(&controller)
}

fn parse_id(raw: &str) -> PostId {
    raw.parse().unwrap_or_else(|never| match never {})
}

/// One-shot commands fail when they leave the error view or a notice behind.
fn outcome(controller: &PostsController) -> Result<()> {
    if let View::Error { detail, .. } = controller.view() {
        return Err(anyhow!(detail));
    }
    match controller.state().notice() {
        Some(notice) => Err(anyhow!(notice.message.clone())),
        None => Ok(()),
    }
}
