//! Admin dashboard page

use std::fmt::Write;

use super::layout::escape;
use crate::store::ContactMessage;
use crate::views::AdminState;

/// Body of the admin page for a viewer snapshot
pub fn dashboard(state: &AdminState) -> String {
    if state.loading {
        return r#"<section><div class="spinner"></div></section>"#.to_string();
    }

    let error = state
        .error
        .as_deref()
        .map(|e| format!(r#"<div class="banner error">{}</div>"#, escape(e)))
        .unwrap_or_default();

    let list = if state.messages.is_empty() {
        r#"<div class="card" style="text-align:center"><p class="meta">No messages yet</p></div>"#
            .to_string()
    } else {
        state.messages.iter().fold(String::new(), |mut out, m| {
            out.push_str(&message_card(m));
            out
        })
    };

    format!(
        r#"<section>
<p><a href="/">&larr; Back to site</a></p>
<h1 style="margin-top:12px">Admin Dashboard</h1>
<p class="meta">Total messages: {total} · Unread: {unread}</p>
{error}
<div style="display:flex;flex-direction:column;gap:16px;margin-top:24px">{list}</div>
</section>"#,
        total = state.messages.len(),
        unread = state.unread_count(),
    )
}

fn message_card(m: &ContactMessage) -> String {
    let (class, badge) = if m.is_read {
        ("message", r#"<span class="badge read">Read</span>"#)
    } else {
        ("message unread", r#"<span class="badge unread">Unread</span>"#)
    };

    let mut actions = String::new();
    if !m.is_read {
        let _ = write!(
            actions,
            r#"<form method="post" action="/admin/messages/{}/read" style="display:inline"><button class="btn btn-outline" type="submit">Mark as Read</button></form> "#,
            urlencoding::encode(&m.id),
        );
    }
    let reply_subject = format!("Re: {}", m.subject);
    let _ = write!(
        actions,
        r#"<a class="btn btn-primary" href="mailto:{}?subject={}">Reply</a>"#,
        escape(&m.email),
        urlencoding::encode(&reply_subject),
    );

    format!(
        r#"<div class="card {class}" data-id="{id}">
<p>{badge} <strong>{subject}</strong></p>
<p class="meta">{name} &lt;{email}&gt; · {timestamp}</p>
<p style="margin:12px 0;white-space:pre-wrap">{body}</p>
<p>{actions}</p>
</div>"#,
        id = escape(&m.id),
        subject = escape(&m.subject),
        name = escape(&m.name),
        email = escape(&m.email),
        timestamp = m.timestamp.format("%Y-%m-%d %H:%M UTC"),
        body = escape(&m.message),
    )
}
