//! Interactive browsing over stdin.
//!
//! A background task watches the city, list and UI channels and redraws the
//! current screen whenever any of them changes; the input loop only issues
//! commands to the coordinator.

use shiftmap_app::{Coordinator, Screen};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::render;

const HELP: &str = "commands: list | open <N|ID> | back | refresh | quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Open(String),
    Back,
    Refresh,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match words.next()? {
        "list" | "ls" => Command::List,
        "open" => Command::Open(words.next()?.to_owned()),
        "back" => Command::Back,
        "refresh" | "r" => Command::Refresh,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Help,
    };
    Some(command)
}

/// Resolves `target` to a shift id: a 1-based row number if it parses as one
/// and is in range, otherwise the id itself.
fn resolve_target(coordinator: &Coordinator, target: &str) -> String {
    let list = coordinator.shifts();
    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| list.shifts.get(index))
        .map_or_else(|| target.to_owned(), |shift| shift.id.clone())
}

fn spawn_renderer(coordinator: Coordinator) -> JoinHandle<()> {
    let mut city_rx = coordinator.subscribe_city();
    let mut shifts_rx = coordinator.subscribe_shifts();
    let mut ui_rx = coordinator.subscribe_ui();

    tokio::spawn(async move {
        let mut last_screen = String::new();
        loop {
            tokio::select! {
                changed = city_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let headline = render::headline(&city_rx.borrow_and_update());
                    println!("{headline}");
                }
                changed = shifts_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let list = shifts_rx.borrow_and_update().clone();
                    // Selection changes arrive through the UI channel; only
                    // the list view follows the store directly.
                    if !coordinator.ui().detail_visible {
                        show(&mut last_screen, render::list(&list));
                    }
                }
                changed = ui_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let ui = ui_rx.borrow_and_update().clone();
                    let text = render::screen(&Screen::derive(&ui), &coordinator.shifts());
                    show(&mut last_screen, text);
                }
            }
        }
    })
}

/// Prints `text` unless it repeats what is already on screen.
fn show(last: &mut String, text: String) {
    if *last != text {
        println!("{text}");
        *last = text;
    }
}

pub(crate) async fn run_browse(coordinator: Coordinator) -> anyhow::Result<()> {
    let renderer = spawn_renderer(coordinator.clone());

    if coordinator.trigger_location_flow().await.is_none() {
        println!("Location unavailable; restart with --lat/--lon to load shifts.");
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            continue;
        };
        match command {
            Command::List => {
                if coordinator.ui().detail_visible {
                    coordinator.close_detail();
                } else {
                    println!("{}", render::list(&coordinator.shifts()));
                }
            }
            Command::Open(target) => {
                let id = resolve_target(&coordinator, &target);
                if coordinator.select(&id).is_none() {
                    println!("no shift '{target}' in the current list");
                }
            }
            Command::Back => coordinator.close_detail(),
            Command::Refresh => {
                if coordinator.refresh().is_none() {
                    println!("no position yet; nothing to refresh");
                }
            }
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
        }
    }

    renderer.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("list"), Some(Command::List));
        assert_eq!(
            parse_command("open 3"),
            Some(Command::Open("3".to_owned()))
        );
        assert_eq!(parse_command("  back "), Some(Command::Back));
        assert_eq!(parse_command("refresh"), Some(Command::Refresh));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("dance"), Some(Command::Help));
    }

    #[test]
    fn blank_line_and_bare_open_are_ignored() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("open"), None);
    }
}
