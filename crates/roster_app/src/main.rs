//! Console shell around the roster session: fetches the user list once and
//! prints it as the edit script a list view would apply.

use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use roster_core::{apply_edits, diff, EditOp, User};
use roster_engine::{ReqwestTransport, Session, TransportSettings};

const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

fn main() -> anyhow::Result<()> {
    roster_logging::initialize_terminal();

    let base_url = env::var("ROSTER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let mut settings = TransportSettings::default();
    if let Ok(secs) = env::var("ROSTER_TIMEOUT_SECS") {
        let secs: u64 = secs
            .parse()
            .context("ROSTER_TIMEOUT_SECS must be an integer")?;
        settings.connect_timeout = Duration::from_secs(secs);
        settings.request_timeout = Duration::from_secs(secs);
    }

    let transport = ReqwestTransport::new(&base_url, settings)
        .map_err(|err| anyhow::anyhow!("cannot build transport for {base_url}: {err}"))?;
    let mut session = Session::new(Arc::new(transport));

    log::info!("fetching users from {base_url}");
    session.refresh();
    run_until_settled(&mut session)
}

/// Pumps the session until the fetch reaches a terminal state, rendering
/// each observed transition.
fn run_until_settled(session: &mut Session) -> anyhow::Result<()> {
    let deadline = Instant::now() + Duration::from_secs(120);
    let mut rendered: Vec<User> = Vec::new();

    loop {
        if session.pump() > 0 {
            if *session.is_loading().borrow() {
                println!("Loading users...");
                continue;
            }
            if let Some(message) = session.error_message().borrow().clone() {
                println!("Error: {message}");
                return Ok(());
            }
            let items = session.items().borrow().clone();
            render_incremental(&mut rendered, &items);
            return Ok(());
        }
        if Instant::now() > deadline {
            anyhow::bail!("timed out waiting for a fetch outcome");
        }
        thread::sleep(Duration::from_millis(50));
    }
}

/// Applies the edit script against the rendered list, echoing each
/// operation the way an incremental view would consume it.
fn render_incremental(rendered: &mut Vec<User>, items: &[User]) {
    let script = diff(rendered, items);
    for op in &script {
        match op {
            EditOp::Remove { index } => println!("  - row {index} removed"),
            EditOp::Insert { index, user } => println!("  + row {index}: {}", describe(user)),
            EditOp::Update { index, user } => println!("  ~ row {index}: {}", describe(user)),
        }
    }
    *rendered = apply_edits(rendered, &script);
    println!("{} users", rendered.len());
}

fn describe(user: &User) -> String {
    match user.email.as_deref() {
        Some(email) => format!("{} <{email}>", user.display_name()),
        None => user.display_name().to_string(),
    }
}
