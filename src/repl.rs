//! Interactive chat loop
//!
//! Reads one line per turn, prints the agent's reply from the history
//! snapshot, and exposes the surfaces snapshot through a slash command.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use confab_core::history::Role;
use confab_core::protocol::Part;
use confab_core::{Outbound, TurnCoordinator};

pub async fn run(coordinator: Arc<TurnCoordinator>) -> Result<()> {
    println!(
        "{}",
        style("confab - type a message, /surfaces to inspect, /quit to exit").dim()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style(">").cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            "/quit" | "/exit" => break,
            "/surfaces" => {
                print_surfaces(&coordinator);
                continue;
            }
            _ => {}
        }

        let seen = coordinator.history().len();
        match coordinator.send_turn(Outbound::Text(line.to_string())).await {
            Ok(()) => print_new_turns(&coordinator, seen),
            Err(error) => eprintln!("{} {}", style("error:").red().bold(), error),
        }
    }

    Ok(())
}

/// Print every turn appended since the caller's last look
fn print_new_turns(coordinator: &TurnCoordinator, seen: usize) {
    let history = coordinator.history();
    for turn in history.iter().skip(seen) {
        let Role::Agent { display_name, .. } = &turn.role else {
            continue;
        };
        for content in &turn.contents {
            match &content.part {
                Part::Text { text } => {
                    println!("{} {}", style(format!("{display_name}:")).green().bold(), text);
                }
                Part::Data { .. } => {
                    println!("{}", style("[surface content]").magenta().dim());
                }
            }
        }
    }

    let surfaces = coordinator.surfaces();
    if !surfaces.is_empty() {
        println!(
            "{}",
            style(format!("({} surface(s) active)", surfaces.len())).dim()
        );
    }
}

fn print_surfaces(coordinator: &TurnCoordinator) {
    let surfaces = coordinator.surfaces();
    if surfaces.is_empty() {
        println!("{}", style("no surfaces").dim());
        return;
    }
    let mut ids: Vec<_> = surfaces.keys().collect();
    ids.sort();
    for id in ids {
        println!("{}", style(id).cyan().bold());
        match serde_json::to_string_pretty(&surfaces[id]) {
            Ok(pretty) => println!("{pretty}"),
            Err(error) => eprintln!("{} {}", style("error:").red().bold(), error),
        }
    }
}
