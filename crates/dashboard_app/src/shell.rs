use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use dashboard_core::{LocalFile, Msg};
use dashboard_logging::dashboard_warn;

use crate::render;
use crate::session::SessionRunner;

const HELP: &str = "commands: select <path> | submit | clear | history | profile | show | logout | help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Select(PathBuf),
    Submit,
    Clear,
    History,
    Profile,
    Show,
    Logout,
    Help,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "select" if rest.is_empty() => Err("usage: select <path>".to_string()),
            "select" => Ok(ShellCommand::Select(PathBuf::from(rest))),
            "submit" => Ok(ShellCommand::Submit),
            "clear" => Ok(ShellCommand::Clear),
            "history" => Ok(ShellCommand::History),
            "profile" => Ok(ShellCommand::Profile),
            "show" => Ok(ShellCommand::Show),
            "logout" | "quit" | "exit" => Ok(ShellCommand::Logout),
            "help" | "?" => Ok(ShellCommand::Help),
            other => Err(format!("unknown command {other:?}; {HELP}")),
        }
    }

    fn into_msg(self) -> Option<Msg> {
        match self {
            ShellCommand::Select(path) => Some(Msg::FileSelected(Some(LocalFile::from_path(path)))),
            ShellCommand::Submit => Some(Msg::SubmitClicked),
            ShellCommand::Clear => Some(Msg::ClearClicked),
            ShellCommand::History => Some(Msg::HistoryRequested),
            ShellCommand::Profile => Some(Msg::ProfileRequested),
            ShellCommand::Logout => Some(Msg::LogoutClicked),
            ShellCommand::Show | ShellCommand::Help => None,
        }
    }
}

/// Interactive loop: one command per line, re-rendering whenever the session changed.
pub fn run(runner: &mut SessionRunner, wait: Duration) -> Result<()> {
    runner.start();
    if !runner.wait_idle(wait) {
        dashboard_warn!("timed out waiting for profile and history");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Some(view) = runner.take_render() {
        writeln!(stdout, "{}", render::render(&view))?;
    }
    writeln!(stdout, "{HELP}")?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(stdout, "{message}")?;
                continue;
            }
        };

        match command.clone().into_msg() {
            Some(msg) => runner.dispatch(msg),
            None if command == ShellCommand::Help => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            None => {
                writeln!(stdout, "{}", render::render(&runner.view()))?;
                continue;
            }
        }
        if runner.is_closed() {
            writeln!(stdout, "Logged out.")?;
            break;
        }
        if !runner.wait_idle(wait) {
            dashboard_warn!("timed out waiting for the services");
        }
        if let Some(view) = runner.take_render() {
            writeln!(stdout, "{}", render::render(&view))?;
        }
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::ShellCommand;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(ShellCommand::parse("SUBMIT"), Ok(ShellCommand::Submit));
        assert_eq!(ShellCommand::parse("  clear "), Ok(ShellCommand::Clear));
        assert_eq!(ShellCommand::parse("quit"), Ok(ShellCommand::Logout));
    }

    #[test]
    fn select_keeps_path_with_spaces() {
        assert_eq!(
            ShellCommand::parse("select /tmp/my photos/cat.png"),
            Ok(ShellCommand::Select(PathBuf::from("/tmp/my photos/cat.png")))
        );
        assert!(ShellCommand::parse("select").is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(ShellCommand::parse("predict").is_err());
    }
}
