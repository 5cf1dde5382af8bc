use super::*;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use client_core::PostsApi;
use shared::protocol::{DeletedPost, Post, PostFields};

#[derive(Default)]
struct MemoryPostsApi {
    posts: Mutex<Vec<Post>>,
    unavailable: bool,
}

#[async_trait]
impl PostsApi for MemoryPostsApi {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        if self.unavailable {
            anyhow::bail!("connection refused");
        }
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn create_post(&self, fields: &PostFields) -> Result<Post> {
        let mut posts = self.posts.lock().unwrap();
        let post = fields.clone().with_id(PostId::Number(posts.len() as i64 + 1));
        posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, post: &Post) -> Result<Post> {
        let mut posts = self.posts.lock().unwrap();
        if let Some(slot) = posts.iter_mut().find(|p| p.id == post.id) {
            *slot = post.clone();
        }
        Ok(post.clone())
    }

    async fn delete_post(&self, id: &PostId) -> Result<DeletedPost> {
        self.posts.lock().unwrap().retain(|p| &p.id != id);
        Ok(DeletedPost::Id(id.clone()))
    }
}

async fn run(api: MemoryPostsApi, script: &str) -> (PostsController, String) {
    let mut controller = PostsController::new(Arc::new(api));
    let mut output = Vec::new();
    run_session(&mut controller, script.as_bytes(), &mut output)
        .await
        .expect("session");
    (controller, String::from_utf8(output).expect("utf8"))
}

#[test]
fn parses_commands_and_ids() {
    assert_eq!(
        parse_command("title Hello there"),
        Ok(SessionCommand::SetField(PostField::Title, "Hello there".into()))
    );
    assert_eq!(
        parse_command("BODY  text "),
        Ok(SessionCommand::SetField(PostField::Body, "text".into()))
    );
    assert_eq!(parse_command("edit 3"), Ok(SessionCommand::Edit(PostId::Number(3))));
    assert_eq!(
        parse_command("delete a1"),
        Ok(SessionCommand::Delete(PostId::Text("a1".into())))
    );
    assert_eq!(parse_command("submit"), Ok(SessionCommand::Submit));
    assert!(parse_command("delete").is_err());
    assert!(parse_command("frobnicate").is_err());
}

#[tokio::test]
async fn scripted_session_creates_edits_and_deletes() {
    let script = "\
title A
body B
submit
edit 1
title A2
update
delete 1
quit
";
    let (controller, output) = run(MemoryPostsApi::default(), script).await;

    assert!(output.starts_with("Loading posts...\n"));
    assert!(output.contains("[1] A\n"));
    assert!(output.contains("[Update] [Cancel Edit]"));
    assert!(output.contains("[1] A2\n"));
    assert!(controller.state().posts().is_empty());
}

#[tokio::test]
async fn focused_title_accepts_bare_text() {
    let (controller, output) = run(MemoryPostsApi::default(), "My first post\n").await;
    assert!(output.contains("title> "));
    assert_eq!(controller.state().draft().title, "My first post");
}

#[tokio::test]
async fn validation_notice_is_rendered_without_network_call() {
    let (controller, output) = run(MemoryPostsApi::default(), "body only\nsubmit\n").await;
    assert!(output.contains("! invalid: post title must not be empty"));
    assert!(controller.state().posts().is_empty());
}

#[tokio::test]
async fn error_view_only_accepts_quit() {
    let api = MemoryPostsApi {
        unavailable: true,
        ..MemoryPostsApi::default()
    };
    let (controller, output) = run(api, "title ignored\nquit\n").await;

    assert!(output.contains("Error loading posts..."));
    assert!(output.contains("posts are unavailable"));
    assert!(!output.contains("Welcome to the post machine!"));
    assert_eq!(controller.state().draft().title, "");
}

#[test]
fn focused_title_only_runs_lone_keywords() {
    assert_eq!(parse_focused_title("quit"), Ok(SessionCommand::Quit));
    assert_eq!(parse_focused_title(" submit "), Ok(SessionCommand::Submit));
    assert_eq!(
        parse_focused_title("Edit notes"),
        Ok(SessionCommand::SetField(PostField::Title, "Edit notes".into()))
    );
    assert_eq!(
        parse_focused_title("title"),
        Ok(SessionCommand::SetField(PostField::Title, String::new()))
    );
    assert_eq!(
        parse_focused_title("delete"),
        Ok(SessionCommand::SetField(PostField::Title, "delete".into()))
    );
    assert!(parse_focused_title("   ").is_err());
}

#[tokio::test]
async fn focused_title_keeps_text_starting_with_add() {
    let (controller, _output) = run(MemoryPostsApi::default(), "Add milk to the list\n").await;
    assert_eq!(controller.state().draft().title, "Add milk to the list");
    assert!(controller.state().notice().is_none());
    assert!(controller.state().posts().is_empty());
}

#[tokio::test]
async fn focused_title_keeps_text_starting_with_quit() {
    let (controller, _output) =
        run(MemoryPostsApi::default(), "Quit smoking\nbody now\n").await;
    assert_eq!(
        controller.state().draft(),
        &client_core::Draft {
            id: None,
            title: "Quit smoking".into(),
            body: "now".into(),
        }
    );
}
