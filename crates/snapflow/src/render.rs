//! Terminal output: tables, menus, errors

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use snapflow_hcloud::{HcloudError, Server, Snapshot};

pub fn server_table(servers: &[Server]) {
    println!();
    if servers.is_empty() {
        println!("{}", "No servers found.".dimmed());
        return;
    }

    println!(
        "{}",
        format!("{:<5} {:<30} {:<12}", "NO.", "NAME", "STATUS").bold()
    );
    println!("{}", "─".repeat(48).dimmed());

    for (i, server) in servers.iter().enumerate() {
        let status_colored = if server.status == "running" {
            server.status.green()
        } else {
            server.status.yellow()
        };

        println!(
            "{:<5} {:<30} {:<12}",
            (i + 1).to_string().cyan(),
            server.name,
            status_colored
        );
    }
}

pub fn snapshot_table(server: &Server, snapshots: &[Snapshot]) {
    println!();
    println!(
        "{}",
        format!("Snapshots for {} (id {})", server.name, server.id).bold()
    );

    if snapshots.is_empty() {
        println!("{}", "No snapshots found for this server.".dimmed());
        return;
    }

    println!(
        "{}",
        format!(
            "{:<5} {:<12} {:<42} {:<20} {:<10} {:>9}",
            "NO.", "ID", "DESCRIPTION", "CREATED", "BOUND TO", "SIZE (GB)"
        )
        .bold()
    );
    println!("{}", "─".repeat(103).dimmed());

    for (i, snapshot) in snapshots.iter().enumerate() {
        let created = snapshot.created.format("%Y-%m-%d %H:%M:%S").to_string();
        let bound_to = snapshot
            .bound_to
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let size = snapshot
            .image_size
            .map(|gb| format!("{:.2}", gb))
            .unwrap_or_else(|| "N/A".to_string());

        println!(
            "{:<5} {:<12} {:<42} {:<20} {:<10} {:>9}",
            (i + 1).to_string().cyan(),
            snapshot.id,
            snapshot.display_description(),
            created.dimmed(),
            bound_to,
            size
        );
    }

    println!("{}", format!("{} snapshot(s)", snapshots.len()).dimmed());
}

pub fn main_menu_options(store_name: Option<&str>) {
    println!();
    match store_name {
        Some(name) => println!("{}  store API token in the {}", "0.".cyan(), name),
        None => println!(
            "{}  store API token {}",
            "0.".cyan(),
            "(unavailable on this platform)".dimmed()
        ),
    }
    println!("{}  refresh the server list", "r.".cyan());
    println!("{}  quit", "q.".cyan());
    println!(
        "{}",
        "Or enter a server number to manage its snapshots.".dimmed()
    );
}

pub fn server_menu_options() {
    println!();
    println!("{}  create a new snapshot", "1.".cyan());
    println!("{}  delete a snapshot", "2.".cyan());
    println!("{}  back to the server list", "3.".cyan());
    println!("{}  quit", "q.".cyan());
}

pub fn error(e: &HcloudError) {
    println!("{} {}", "Error:".red().bold(), e);
}

/// Progress bar for action polling, 0-100.
pub fn action_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos:>3}% {msg}")
            .unwrap(),
    );
    pb.set_message("creating snapshot...");
    pb
}
