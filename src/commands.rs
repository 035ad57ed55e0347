//! Line commands typed into the terminal, and the text shown back.

use std::fmt::Write as _;

use crate::catalog::MOOD_OPTIONS;
use crate::error::CommandError;
use crate::models::Screen;
use crate::session::{OrchestratorSnapshot, UiCommand};
use crate::timer::TimerPhase;

pub const HELP: &str = "\
commands:
  oracle            pick a meditation by mood
  path              open the Path of the Void
  mood <text>       choose a mood (on the oracle screen)
  preview <n>       read stage n before starting
  stage <n>         start stage n
  start | pause     resume or pause the session
  reset             rewind the session to its full length
  exit              leave the session for the menu
  menu | back       leave the complete screen / go back one screen
  status            show the current screen
  reset-progress    forget every completed stage
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ui(UiCommand),
    Status,
    Help,
    Quit,
}

/// `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "oracle" => Command::Ui(UiCommand::OpenMoodPick),
        "path" => Command::Ui(UiCommand::OpenPathway),
        "mood" => Command::Ui(UiCommand::SelectMood(rest.to_string())),
        "preview" => Command::Ui(UiCommand::PreviewStage(stage_arg("preview", rest)?)),
        "stage" => Command::Ui(UiCommand::SelectStage(stage_arg("stage", rest)?)),
        "start" | "resume" => Command::Ui(UiCommand::Start),
        "pause" => Command::Ui(UiCommand::Pause),
        "reset" => Command::Ui(UiCommand::ResetSession),
        "exit" => Command::Ui(UiCommand::ExitToMenu),
        "menu" => Command::Ui(UiCommand::ReturnToMenu),
        "back" => Command::Ui(UiCommand::Back),
        "reset-progress" => Command::Ui(UiCommand::ResetAllProgress),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn stage_arg(command: &'static str, rest: &str) -> Result<u32, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingStage(command));
    }
    rest.parse()
        .map_err(|_| CommandError::InvalidStage(rest.to_string()))
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Twenty-cell bar of the collapse progress.
pub fn progress_bar(progress: f32) -> String {
    const CELLS: usize = 20;
    let filled = ((progress.clamp(0.0, 1.0) * CELLS as f32).round() as usize).min(CELLS);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(CELLS - filled))
}

/// What the terminal prints for a snapshot.
pub fn describe(snapshot: &OrchestratorSnapshot) -> String {
    let mut out = String::new();
    match snapshot.screen {
        Screen::Menu => {
            let _ = writeln!(out, "SHUNYA :: 'oracle' for a mood meditation, 'path' for the pathway");
        }
        Screen::MoodPick => {
            let _ = writeln!(out, "How do you feel? ('mood <text>')");
            for option in MOOD_OPTIONS.iter() {
                let _ = writeln!(out, "  {} ({})", option.label, option.value);
            }
        }
        Screen::PathwaySelect => {
            let _ = writeln!(out, "The Path of the Void");
            for view in &snapshot.stages {
                let marker = if view.completed {
                    "done"
                } else if view.unlocked {
                    "open"
                } else {
                    "locked"
                };
                let _ = writeln!(
                    out,
                    "  {}. {:<28} {:>6}  {}",
                    view.stage.ordinal,
                    view.stage.title,
                    format_clock(view.stage.duration_seconds),
                    marker
                );
            }
        }
        Screen::StageIntro => {
            if let Some(stage) = snapshot.preview {
                let _ = writeln!(out, "Stage {}: {} ({})", stage.ordinal, stage.title, stage.technique);
                let _ = writeln!(out, "{}", stage.instruction);
                let _ = writeln!(
                    out,
                    "{} :: 'stage {}' to begin, 'back' to return",
                    format_clock(stage.duration_seconds),
                    stage.id
                );
            }
        }
        Screen::Session | Screen::Complete => {
            if let (Some(active), Some(session)) = (snapshot.active, snapshot.session.as_ref()) {
                let status = match (snapshot.screen, session.phase) {
                    (Screen::Complete, _) | (_, TimerPhase::Finished) => "complete",
                    (_, TimerPhase::Running) => "running",
                    (_, TimerPhase::Idle) => "paused",
                };
                let _ = writeln!(out, "{} :: {}", active.title(), status);
                if snapshot.screen == Screen::Session {
                    let _ = writeln!(out, "{}", active.instructions());
                }
                let _ = writeln!(
                    out,
                    "{} {} {}",
                    format_clock(session.remaining_seconds),
                    progress_bar(snapshot.frame.progress),
                    snapshot.frame.theme().color_hex()
                );
            }
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_screen_commands() {
        assert_eq!(parse("oracle").unwrap(), Some(Command::Ui(UiCommand::OpenMoodPick)));
        assert_eq!(parse("  PATH ").unwrap(), Some(Command::Ui(UiCommand::OpenPathway)));
        assert_eq!(parse("stage 3").unwrap(), Some(Command::Ui(UiCommand::SelectStage(3))));
        assert_eq!(parse("preview 1").unwrap(), Some(Command::Ui(UiCommand::PreviewStage(1))));
        assert_eq!(parse("menu").unwrap(), Some(Command::Ui(UiCommand::ReturnToMenu)));
        assert_eq!(parse("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse("").unwrap(), None);
    }

    #[test]
    fn mood_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse("mood  seeking clarity ").unwrap(),
            Some(Command::Ui(UiCommand::SelectMood("seeking clarity".into())))
        );
        assert_eq!(
            parse("mood").unwrap(),
            Some(Command::Ui(UiCommand::SelectMood(String::new())))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse("stage"), Err(CommandError::MissingStage("stage")));
        assert_eq!(parse("stage two"), Err(CommandError::InvalidStage("two".into())));
        assert_eq!(parse("levitate"), Err(CommandError::Unknown("levitate".into())));
    }

    #[test]
    fn clock_and_bar() {
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(progress_bar(0.0), format!("[{}]", ".".repeat(20)));
        assert_eq!(progress_bar(1.0), format!("[{}]", "#".repeat(20)));
        assert_eq!(progress_bar(0.5).matches('#').count(), 10);
    }
}
