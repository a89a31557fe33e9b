//! Parsing of lines typed at a tool page.
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `name=value`, `set name value` | edit a parameter |
//! | `run`, `next`, `n`, `r` | execute / confirm |
//! | `close`, `quit`, `q` | close the window |
//! | `abort`, `kill` | stop the running command |
//! | `show`, `ls`, empty line | redraw the page |
//! | `help`, `?` | list commands |

use chainrun_application::UserEvent;
use chainrun_domain::ParamValue;

#[derive(Debug, Clone, PartialEq)]
pub enum TerminalCommand {
    Event(UserEvent),
    Show,
    Help,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  name=value        set a parameter (also: set name value)
  run | next        run the tool, or continue after it succeeded
  abort             stop the running command
  close | quit      close the window
  show              redraw the parameters
  help              show this help";

pub fn parse_command(line: &str) -> TerminalCommand {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("set ") {
        let rest = rest.trim_start();
        let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        return edit(name, value.trim());
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "" | "show" | "ls" => return TerminalCommand::Show,
        "help" | "?" | "h" => return TerminalCommand::Help,
        "run" | "next" | "n" | "r" => return TerminalCommand::Event(UserEvent::Next),
        "close" | "quit" | "q" | "exit" => return TerminalCommand::Event(UserEvent::Close),
        "abort" | "kill" | "stop" => return TerminalCommand::Event(UserEvent::Abort),
        _ => {}
    }

    match trimmed.split_once('=') {
        Some((name, value)) => edit(name.trim(), value.trim()),
        None => TerminalCommand::Unknown(trimmed.to_string()),
    }
}

fn edit(name: &str, value: &str) -> TerminalCommand {
    if name.is_empty() || name.contains(char::is_whitespace) {
        return TerminalCommand::Unknown(format!("{}={}", name, value));
    }
    TerminalCommand::Event(UserEvent::Edit {
        parameter: name.to_string(),
        value: ParamValue::Str(unquote(value).to_string()),
    })
}

/// Strip one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit_event(name: &str, value: &str) -> TerminalCommand {
        TerminalCommand::Event(UserEvent::Edit {
            parameter: name.to_string(),
            value: ParamValue::from(value),
        })
    }

    #[test]
    fn test_gestures() {
        assert_eq!(parse_command("run"), TerminalCommand::Event(UserEvent::Next));
        assert_eq!(parse_command("  Next "), TerminalCommand::Event(UserEvent::Next));
        assert_eq!(parse_command("q"), TerminalCommand::Event(UserEvent::Close));
        assert_eq!(parse_command("abort"), TerminalCommand::Event(UserEvent::Abort));
        assert_eq!(parse_command(""), TerminalCommand::Show);
        assert_eq!(parse_command("?"), TerminalCommand::Help);
    }

    #[test]
    fn test_assignment() {
        assert_eq!(parse_command("iterations=10"), edit_event("iterations", "10"));
        assert_eq!(parse_command(" crf = 20 "), edit_event("crf", "20"));
        assert_eq!(parse_command("note="), edit_event("note", ""));
        assert_eq!(parse_command("expr=a=b"), edit_event("expr", "a=b"));
    }

    #[test]
    fn test_set_form_and_quotes() {
        assert_eq!(
            parse_command("set command make test"),
            edit_event("command", "make test")
        );
        assert_eq!(
            parse_command("command=\"echo hi\""),
            edit_event("command", "echo hi")
        );
        assert_eq!(parse_command("x='\"'"), edit_event("x", "\""));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            parse_command("launch rockets"),
            TerminalCommand::Unknown("launch rockets".to_string())
        );
        assert!(matches!(parse_command("two words=1"), TerminalCommand::Unknown(_)));
        assert!(matches!(parse_command("=1"), TerminalCommand::Unknown(_)));
    }
}
