//! Plain-text rendering of client views for the terminal.

use std::fmt::{self, Write};

use client_core::{
    view::{FormView, PostItem, ReadyView},
    NoticeKind, View,
};

pub fn render_text(view: &View) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_view(&mut out, view)?;
    Ok(out)
}

fn write_view(out: &mut impl Write, view: &View) -> fmt::Result {
    match view {
        View::Loading { heading } => writeln!(out, "{heading}"),
        View::Error { heading, detail } => writeln!(out, "{heading}\n  {detail}"),
        View::Ready(ready) => write_ready(out, ready),
    }
}

fn write_ready(out: &mut impl Write, view: &ReadyView) -> fmt::Result {
    writeln!(out, "{}\n", view.heading)?;

    if view.posts.is_empty() {
        writeln!(out, "  (no posts yet)")?;
    }
    for item in &view.posts {
        write_item(out, item)?;
    }
    writeln!(out)?;

    if let Some(notice) = &view.notice {
        let label = match notice.kind {
            NoticeKind::Validation => "invalid",
            NoticeKind::Network => "error",
        };
        writeln!(out, "! {label}: {} (dismiss to close)", notice.message)?;
    }
    write_form(out, &view.form)
}

fn write_item(out: &mut impl Write, item: &PostItem) -> fmt::Result {
    writeln!(out, "  [{}] {}", item.id, item.title)?;
    writeln!(out, "      {}", item.body)?;

    let mut actions = Vec::new();
    if item.can_edit {
        actions.push(format!("edit {}", item.id));
    }
    if item.can_delete {
        actions.push(format!("delete {}", item.id));
    }
    if actions.is_empty() {
        return Ok(());
    }
    writeln!(out, "      ({})", actions.join(" | "))
}

fn write_form(out: &mut impl Write, form: &FormView) -> fmt::Result {
    writeln!(out, "  title: {}", form.title)?;
    writeln!(out, "  body:  {}", form.body)?;
    match form.cancel_label {
        Some(cancel) => writeln!(out, "  [{}] [{cancel}]", form.submit_label),
        None => writeln!(out, "  [{}]", form.submit_label),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
