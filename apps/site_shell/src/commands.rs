//! Line commands typed into the shell, mapped onto page events.

use page_core::{ElementId, Key, PageEvent};
use shared::domain::FormField;

use crate::console_view::MENU_TOGGLE;

#[derive(Debug, Clone)]
pub enum ShellCommand {
    Page(PageEvent),
    Back,
    Forward,
    SetField(FormField, String),
    Submit,
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid {what} '{value}'")]
    InvalidArgument { what: &'static str, value: String },
}

pub const HELP: &str = "\
commands:
  goto <section>          navigate (home, contact, faq, tos, privacy)
  back | forward          move through history
  menu                    toggle the sidebar
  close                   dismiss the sidebar
  key <name> [shift]      press a key (Escape, Tab, ...)
  scroll <offset>         report the page scroll offset
  faq <index>             toggle an FAQ item
  field <name> <value>    set a contact form field
  submit                  submit the contact form
  show                    print the page state
  help | quit";

/// Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, CommandError> {
    let line = line.trim();
    let Some((head, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match head {
        "goto" | "go" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "goto",
                    expected: "a section",
                });
            }
            // The whole remainder is the target; navigation decides if it is usable.
            ShellCommand::Page(PageEvent::NavClick {
                target: rest.to_string(),
            })
        }
        "back" => ShellCommand::Back,
        "forward" => ShellCommand::Forward,
        "menu" => ShellCommand::Page(PageEvent::ToggleSidebar {
            trigger: Some(ElementId::from(MENU_TOGGLE)),
        }),
        "close" => ShellCommand::Page(PageEvent::CloseSidebar),
        "key" => {
            let (name, modifiers) = split_word(rest).ok_or(CommandError::MissingArgument {
                command: "key",
                expected: "a key name",
            })?;
            ShellCommand::Page(PageEvent::KeyDown {
                key: Key::from_name(name),
                shift: modifiers.eq_ignore_ascii_case("shift"),
            })
        }
        "scroll" => {
            let offset = rest.parse::<f64>().map_err(|_| CommandError::InvalidArgument {
                what: "scroll offset",
                value: rest.to_string(),
            })?;
            ShellCommand::Page(PageEvent::Scroll { offset })
        }
        "faq" => {
            let index = rest
                .parse::<usize>()
                .map_err(|_| CommandError::InvalidArgument {
                    what: "faq index",
                    value: rest.to_string(),
                })?;
            ShellCommand::Page(PageEvent::FaqToggle { index })
        }
        "field" => {
            let (name, value) = split_word(rest).ok_or(CommandError::MissingArgument {
                command: "field",
                expected: "a field name",
            })?;
            let field = FormField::ALL
                .into_iter()
                .find(|field| field.key() == name.to_ascii_lowercase())
                .ok_or_else(|| CommandError::InvalidArgument {
                    what: "field",
                    value: name.to_string(),
                })?;
            ShellCommand::SetField(field, value.to_string())
        }
        "submit" => ShellCommand::Submit,
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    Some(match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (input, ""),
    })
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
