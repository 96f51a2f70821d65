use std::path::Path;

use cg_session::{
    CampaignProvider, DirectoryProvider, Scorecard, SessionConfig, SessionEvent, SessionRun,
    spawn,
};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

pub fn run(scenarios: Option<&Path>, config: SessionConfig) -> Result<(), String> {
    let mut provider = CampaignProvider::new();
    if let Some(dir) = scenarios {
        if !dir.is_dir() {
            return Err(format!("scenario directory not found: {}", dir.display()));
        }
        let generator = DirectoryProvider::new(dir);
        debug!(root = %generator.root().display(), "serving generated levels");
        provider = provider.with_generator(generator);
    }

    debug!(
        start_level = config.start_level,
        generator = scenarios.is_some(),
        "starting session"
    );
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;

    println!("  {} CyberGuard terminal", "Starting".bold());
    println!("  Type 'help' for commands, 'exit' to leave.");

    let card = runtime.block_on(play(provider, config))?;
    print_summary(&card);
    Ok(())
}

/// Pump stdin into the session and render its events until it stops.
///
/// A line is only read once the session has answered the previous one, so
/// piped input is never fed to a level that is still loading.
async fn play(provider: CampaignProvider, config: SessionConfig) -> Result<Scorecard, String> {
    let SessionRun {
        handle,
        mut events,
        task,
    } = spawn(provider, config);
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut view = View::default();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            biased;
            event = events.recv() => {
                let Some(event) = event else { break };
                if view.show(&event) {
                    break;
                }
            }
            line = stdin.next_line(), if stdin_open && view.ready() => {
                match line.map_err(|e| format!("failed to read input: {e}"))? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => {
                        if handle.submit_line(line).is_err() {
                            break;
                        }
                        view.awaiting = true;
                    }
                    None => {
                        stdin_open = false;
                        if handle.request_exit().is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }

    task.await.map_err(|e| format!("session task failed: {e}"))
}

/// Terminal rendering state.
struct View {
    /// Transcript lines already printed for the current level.
    printed: usize,
    /// Waiting for the session to answer; stdin is not read meanwhile.
    awaiting: bool,
    /// A level was solved and the next one has not arrived yet.
    advancing: bool,
}

impl Default for View {
    fn default() -> Self {
        Self {
            printed: 0,
            awaiting: true,
            advancing: false,
        }
    }
}

impl View {
    fn ready(&self) -> bool {
        !self.awaiting && !self.advancing
    }

    /// Render one event. Returns `true` once the session has stopped.
    fn show(&mut self, event: &SessionEvent) -> bool {
        match event {
            SessionEvent::LevelChanged { level, scenario } => {
                println!();
                println!(
                    "  {} {}",
                    format!("[{level}]").cyan(),
                    scenario.title.bold().green()
                );
                if !scenario.description.is_empty() {
                    println!("  {}", scenario.description);
                }
                if !scenario.hint.is_empty() {
                    println!("  {} {}", "Hint:".dimmed(), scenario.hint.dimmed());
                }
                println!();
                self.printed = 0;
                self.advancing = false;
            }
            SessionEvent::TranscriptChanged(lines) => {
                if lines.len() < self.printed {
                    self.printed = 0;
                }
                for line in &lines[self.printed..] {
                    println!("{line}");
                }
                self.printed = lines.len();
                self.awaiting = false;
            }
            SessionEvent::ScoreAwarded(points) => {
                println!("  {}", format!("+{points} points").yellow().bold());
                self.advancing = true;
            }
            SessionEvent::GameCompleted => {
                println!();
                println!("  {}", "ALL LEVELS CLEARED. SYSTEM SECURED.".green().bold());
                self.advancing = false;
            }
            SessionEvent::InputRejected { line } => {
                println!("  {}", format!("(busy) ignored: {line}").dimmed());
                self.awaiting = false;
            }
            SessionEvent::Exited => return true,
        }
        false
    }
}

fn print_summary(card: &Scorecard) {
    println!();
    if card.is_empty() {
        println!("  No levels solved.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Level", "Title", "Points", "Solved at"]);
    for record in card.records() {
        table.add_row(vec![
            record.level.to_string(),
            record.title.clone(),
            record.points.to_string(),
            record.completed_at.format("%H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} levels solved, {} points", card.len(), card.total());
}
