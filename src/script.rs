use crate::error::{Error, Result};
use crate::session::Event;
use crate::view::CardId;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Send(Event),
    Wait(Duration),
}

/// Parses an event script: one command per line. Lines starting with `#`
/// are comments.
pub fn parse(text: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let step = parse_line(line).map_err(|reason| Error::Script {
            line: i + 1,
            reason,
        })?;
        steps.push(step);
    }

    Ok(steps)
}

fn parse_line(line: &str) -> std::result::Result<Step, String> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let step = match command {
        "load-more" => Step::Send(Event::LoadMore),
        "cancel-load" => Step::Send(Event::CancelLoad),
        "load" => Step::Send(Event::WindowLoaded),
        "dropdown" => Step::Send(Event::ToggleDropdown),
        "search" => Step::Send(Event::SearchInput(rest.to_string())),
        "filter" => Step::Send(Event::CategorySelected(required(command, rest)?)),
        "nav" => Step::Send(Event::NavLinkClicked(href(command, rest)?)),
        "anchor" => Step::Send(Event::AnchorClicked(href(command, rest)?)),
        "click-card" => Step::Send(Event::CardClicked(CardId(number(command, rest)?))),
        "scroll" => Step::Send(Event::Scroll(number(command, rest)?)),
        "wait" => Step::Wait(Duration::from_millis(number(command, rest)?)),
        _ => return Err(format!("unknown command {:?}", command)),
    };

    Ok(step)
}

fn required(command: &str, rest: &str) -> std::result::Result<String, String> {
    if rest.is_empty() {
        Err(format!("{} needs an argument", command))
    } else {
        Ok(rest.to_string())
    }
}

fn href(command: &str, rest: &str) -> std::result::Result<String, String> {
    let href = required(command, rest)?;
    if href.starts_with('#') {
        Ok(href)
    } else {
        Err(format!("{} expects an in-page #href, got {:?}", command, href))
    }
}

fn number<T: FromStr>(command: &str, rest: &str) -> std::result::Result<T, String> {
    let value = required(command, rest)?;
    value
        .parse()
        .map_err(|_| format!("{} expects a number, got {:?}", command, value))
}
