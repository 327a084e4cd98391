use std::{
    fmt::Write as _,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
    time::Instant,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    load_settings,
    view::{ActivityListView, ParticipantList, NO_PARTICIPANTS_TEXT},
    ActivitiesPage, HttpActivitiesApi, PageController, StatusSeverity,
};
use shared::{
    domain::{ActivityName, ParticipantEmail},
    protocol::UnregisterIntent,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "activities", about = "Browse and manage Mergington High School activities")]
struct Args {
    /// Base URL of the activities server.
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// Settings file to read instead of the default locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every activity with its participants.
    List,
    /// Sign a student up for an activity.
    Signup {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Remove a student from an activity.
    Unregister {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref());
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let base_url = settings.server_base_url()?;
    tracing::debug!(server_url = %base_url, "using activities server");

    let controller = PageController::new(Arc::new(HttpActivitiesApi::new(base_url)));
    let mut events = controller.subscribe_events();
    let mut page = ActivitiesPage::new(settings.message_display());

    match args.command {
        Command::List => {
            let _ = controller.refresh().await;
        }
        Command::Signup { activity, email } => {
            page.form.email = email;
            page.form.selected_activity = Some(activity.into());
            if let Some(request) = page.take_submission(Instant::now()) {
                let _ = controller.signup(&request).await;
            }
        }
        Command::Unregister {
            activity,
            email,
            yes,
        } => {
            let intent = UnregisterIntent::new(
                ActivityName::parse(&activity)?,
                ParticipantEmail::parse(&email)?,
            );
            let prompt = intent.confirmation_prompt();
            page.request_unregister(intent);
            let confirmed = yes || confirm(&prompt)?;
            match page.resolve_unregister(confirmed) {
                Some(intent) => {
                    let _ = controller.unregister(&intent).await;
                }
                None => println!("Cancelled."),
            }
        }
    }

    while let Ok(event) = events.try_recv() {
        page.apply(event, Instant::now());
    }

    print!("{}", render_page(&page));
    Ok(if command_failed(&page) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// A one-shot run reports its last status however short the display window is.
fn command_failed(page: &ActivitiesPage) -> bool {
    matches!(&page.list, ActivityListView::Failed(_))
        || page
            .last_status()
            .is_some_and(|status| status.severity == StatusSeverity::Error)
}

fn render_page(page: &ActivitiesPage) -> String {
    let mut out = String::new();
    match &page.list {
        // Nothing was fetched for this command.
        ActivityListView::Loading => {}
        ActivityListView::Failed(text) => {
            let _ = writeln!(out, "{text}");
        }
        ActivityListView::Loaded(cards) => {
            for card in cards {
                let _ = writeln!(out, "{}", card.name);
                let _ = writeln!(out, "  {}", card.description);
                let _ = writeln!(out, "  {}", card.schedule_line);
                let _ = writeln!(out, "  {}", card.availability_line);
                let _ = writeln!(out, "  {}", card.participants_heading);
                match &card.participants {
                    ParticipantList::Empty => {
                        let _ = writeln!(out, "    {NO_PARTICIPANTS_TEXT}");
                    }
                    ParticipantList::Entries(entries) => {
                        for entry in entries {
                            let _ = writeln!(out, "    - {}", entry.email);
                        }
                    }
                }
                let _ = writeln!(out);
            }
        }
    }

    if let Some(status) = page.last_status() {
        let label = match status.severity {
            StatusSeverity::Success => "ok",
            StatusSeverity::Error => "error",
        };
        let _ = writeln!(out, "[{label}] {}", status.text);
    }
    out
}
