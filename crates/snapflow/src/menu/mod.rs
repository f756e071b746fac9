//! Interactive menu controller
//!
//! Owns the two-screen loop: fetch fresh data, render, read one input
//! event, act on it, transition. API errors are rendered and the menu
//! keeps running; only startup problems abort the process.

mod state;

pub use state::{MenuEvent, MenuState};

use crate::prompt;
use crate::render;
use colored::Colorize;
use snapflow_config::{SecretStore, Settings};
use snapflow_hcloud::{
    HcloudClient, PollConfig, PollOutcome, Server, Snapshot, wait_for_action,
};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub struct Menu {
    client: HcloudClient,
    store: Option<Box<dyn SecretStore>>,
    poll: PollConfig,
    interrupts: Arc<InterruptRouter>,
}

impl Menu {
    /// Must be called on the runtime; installs the session's SIGINT
    /// listener.
    pub fn new(
        client: HcloudClient,
        store: Option<Box<dyn SecretStore>>,
        settings: &Settings,
    ) -> Self {
        Self {
            client,
            store,
            poll: PollConfig {
                interval: settings.poll_interval,
                max_attempts: settings.poll_max_attempts,
            },
            interrupts: InterruptRouter::install(),
        }
    }

    /// Run the menu loop until the user quits.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut state = MenuState::MainMenu;
        loop {
            state = match state {
                MenuState::MainMenu => self.main_menu().await?,
                MenuState::ServerMenu(server) => self.server_menu(server).await?,
                MenuState::Exited => break,
            };
        }
        println!("{}", "Bye.".yellow());
        Ok(())
    }

    async fn main_menu(&mut self) -> anyhow::Result<MenuState> {
        println!();
        println!("{}", "Fetching servers...".blue());

        let servers = match self.client.list_servers().await {
            Ok(servers) => {
                render::server_table(&servers);
                servers
            }
            Err(e) => {
                render::error(&e);
                Vec::new()
            }
        };

        render::main_menu_options(self.store.as_deref().map(|s| s.name()));

        let event = loop {
            let Some(line) = prompt::read_line("> ")? else {
                break MenuEvent::Quit;
            };
            match parse_main_choice(&line, &servers) {
                Some(event) => break event,
                None => println!("{}", "Invalid choice. Try again.".red()),
            }
        };

        if event == MenuEvent::StoreToken {
            self.store_token().await?;
        }

        Ok(MenuState::MainMenu.apply(event))
    }

    async fn server_menu(&mut self, server: Server) -> anyhow::Result<MenuState> {
        println!();
        println!(
            "{}",
            format!("Fetching snapshots for {}...", server.name).blue()
        );

        let snapshots = match self.client.list_snapshots(&server).await {
            Ok(snapshots) => {
                render::snapshot_table(&server, &snapshots);
                snapshots
            }
            Err(e) => {
                render::error(&e);
                Vec::new()
            }
        };

        render::server_menu_options();

        let event = loop {
            let Some(line) = prompt::read_line("> ")? else {
                break MenuEvent::Quit;
            };
            match parse_server_choice(&line) {
                Some(event) => break event,
                None => println!("{}", "Invalid choice. Try again.".red()),
            }
        };

        match event {
            MenuEvent::CreateSnapshot => {
                self.create_snapshot(&server).await;
                prompt::pause()?;
            }
            MenuEvent::DeleteSnapshot => {
                self.delete_snapshot(&snapshots).await?;
                prompt::pause()?;
            }
            _ => {}
        }

        Ok(MenuState::ServerMenu(server).apply(event))
    }

    /// Request a snapshot and block on the action, drawing progress.
    /// Ctrl-C abandons the wait; the action keeps running server-side.
    async fn create_snapshot(&self, server: &Server) {
        let description = format!(
            "Snapshot created on {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        println!();
        println!(
            "{}",
            format!("Creating snapshot for {}...", server.name).blue()
        );

        let action = match self.client.create_snapshot(server.id, &description).await {
            Ok(action) => action,
            Err(e) => {
                render::error(&e);
                return;
            }
        };
        tracing::debug!("Snapshot action {} started", action.id);

        let interrupted = self.interrupts.begin_wait();
        let bar = render::action_progress_bar();
        let outcome = tokio::select! {
            outcome = wait_for_action(&self.client, action.id, self.poll, |action| {
                bar.set_position(u64::from(action.progress));
            }) => Some(outcome),
            _ = interrupted => None,
        };
        self.interrupts.end_wait();

        let Some(outcome) = outcome else {
            bar.finish_and_clear();
            println!(
                "{}",
                "Wait aborted. The snapshot may still complete on the provider side."
                    .yellow()
            );
            return;
        };

        match outcome {
            Ok(PollOutcome::Succeeded(_)) => {
                bar.set_position(100);
                bar.finish_and_clear();
                println!("{}", "Snapshot created successfully.".green().bold());
            }
            Ok(PollOutcome::Failed(action)) => {
                bar.finish_and_clear();
                let detail = action
                    .error
                    .map(|e| format!("{}: {}", e.code, e.message))
                    .unwrap_or_else(|| "unknown error".to_string());
                println!("{} {}", "Snapshot creation failed:".red().bold(), detail);
            }
            Ok(PollOutcome::TimedOut { attempts, .. }) => {
                bar.finish_and_clear();
                println!(
                    "{}",
                    format!(
                        "Gave up after {} status checks. The snapshot may still complete on the provider side.",
                        attempts
                    )
                    .yellow()
                );
            }
            Err(e) => {
                bar.finish_and_clear();
                render::error(&e);
            }
        }
    }

    async fn delete_snapshot(&self, snapshots: &[Snapshot]) -> anyhow::Result<()> {
        if snapshots.is_empty() {
            println!("{}", "No snapshots available to delete.".yellow());
            return Ok(());
        }

        let Some(input) = prompt::read_line("Snapshot number to delete: ")? else {
            return Ok(());
        };
        let snapshot = match input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| snapshots.get(i))
        {
            Some(snapshot) => snapshot,
            None => {
                println!("{}", "Invalid snapshot number.".red());
                return Ok(());
            }
        };

        let question = format!(
            "Delete snapshot {} ({})?",
            snapshot.id,
            snapshot.display_description()
        );
        if !prompt::confirm(&question)? {
            println!("{}", "Aborted.".dimmed());
            return Ok(());
        }

        match self.client.delete_snapshot(snapshot.id).await {
            Ok(()) => println!("{}", "Snapshot deleted.".green()),
            Err(e) => render::error(&e),
        }
        Ok(())
    }

    async fn store_token(&self) -> anyhow::Result<()> {
        let Some(store) = self.store.as_deref() else {
            println!("{}", "Token storage is not available on this platform.".yellow());
            return Ok(());
        };

        let token = match prompt::read_secret("Enter your Hetzner API token: ")? {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => {
                println!("{}", "No token entered.".yellow());
                return Ok(());
            }
        };

        match store.store(&token).await {
            Ok(()) => {
                println!(
                    "{}",
                    format!("Token stored in the {}.", store.name()).green()
                );
                println!(
                    "{}",
                    "It will be picked up the next time snapflow starts.".dimmed()
                );
            }
            Err(e) => println!("{} {}", "Error:".red().bold(), e),
        }
        Ok(())
    }
}

/// Routes SIGINT for the session. While a poll wait is registered the
/// signal aborts only that wait; at any other time the process exits
/// the way an unhandled interrupt would.
struct InterruptRouter {
    active_wait: Mutex<Option<oneshot::Sender<()>>>,
}

impl InterruptRouter {
    /// Spawn the listener task and hand out the shared router.
    fn install() -> Arc<Self> {
        let router = Arc::new(Self {
            active_wait: Mutex::new(None),
        });
        let handle = Arc::clone(&router);
        tokio::spawn(async move {
            loop {
                if tokio::signal::ctrl_c().await.is_err() {
                    return;
                }
                let wait = handle.active_wait.lock().unwrap().take();
                match wait {
                    Some(abort) => {
                        let _ = abort.send(());
                    }
                    // 128 + SIGINT
                    None => std::process::exit(130),
                }
            }
        });
        router
    }

    /// Register the in-flight wait. The receiver resolves when the
    /// user interrupts.
    fn begin_wait(&self) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        *self.active_wait.lock().unwrap() = Some(tx);
        rx
    }

    fn end_wait(&self) {
        *self.active_wait.lock().unwrap() = None;
    }
}

/// Main menu input: `q` quits, `0` stores a token, `r` refreshes, a
/// number selects a server.
fn parse_main_choice(input: &str, servers: &[Server]) -> Option<MenuEvent> {
    match input.trim() {
        "q" | "Q" => Some(MenuEvent::Quit),
        "0" => Some(MenuEvent::StoreToken),
        "r" | "R" => Some(MenuEvent::Refresh),
        other => {
            let number = other.parse::<usize>().ok()?;
            let server = servers.get(number.checked_sub(1)?)?;
            Some(MenuEvent::SelectServer(server.clone()))
        }
    }
}

fn parse_server_choice(input: &str) -> Option<MenuEvent> {
    match input.trim() {
        "1" => Some(MenuEvent::CreateSnapshot),
        "2" => Some(MenuEvent::DeleteSnapshot),
        "3" => Some(MenuEvent::Back),
        "q" | "Q" => Some(MenuEvent::Quit),
        _ => None,
    }
}
