use crate::dashboard::Dashboard;
use crate::error::{validation_error, DashResult, Error};
use std::str::FromStr;

// Export submodules
pub mod calendar;
pub mod settings;
pub mod widgets;

/// Lines printed by `help`
pub const HELP: &[&str] = &[
    "connect          connect your Google calendar",
    "disconnect       sign out of the calendar",
    "refresh          fetch today's events again",
    "quote            show another quote",
    "city <name>      show the weather for a city",
    "name <name>      change the name in the greeting",
    "theme            switch between light and dark",
    "send <email>     email today's summary",
    "enable <widget>  show a widget from the next start",
    "disable <widget> hide a widget from the next start",
    "help             list these commands",
    "quit             close the dashboard",
];

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashCommand {
    Connect,
    Disconnect,
    Refresh,
    Quote,
    City(String),
    Name(String),
    Theme,
    Send(String),
    Enable(String),
    Disable(String),
    Help,
    Quit,
}

impl FromStr for DashCommand {
    type Err = Error;

    /// Verbs are case-insensitive; the argument is kept as typed. A missing
    /// argument is passed on blank so the target reports it.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim().to_string()),
            None => (line, String::new()),
        };

        match verb.to_lowercase().as_str() {
            "connect" => Ok(DashCommand::Connect),
            "disconnect" => Ok(DashCommand::Disconnect),
            "refresh" => Ok(DashCommand::Refresh),
            "quote" => Ok(DashCommand::Quote),
            "city" => Ok(DashCommand::City(arg)),
            "name" => Ok(DashCommand::Name(arg)),
            "theme" => Ok(DashCommand::Theme),
            "send" => Ok(DashCommand::Send(arg)),
            "enable" | "disable" if arg.is_empty() => {
                Err(validation_error("Name a widget: weather, calendar or quotes"))
            }
            "enable" => Ok(DashCommand::Enable(arg.to_lowercase())),
            "disable" => Ok(DashCommand::Disable(arg.to_lowercase())),
            "help" | "?" => Ok(DashCommand::Help),
            "quit" | "exit" => Ok(DashCommand::Quit),
            "" => Err(validation_error("Type a command, or help")),
            other => Err(validation_error(&format!(
                "Unknown command: {}. Type help for a list",
                other
            ))),
        }
    }
}

/// Type alias for command result: the lines to show the user
pub type CommandResult = DashResult<Vec<String>>;

/// Run one command against the dashboard
pub async fn execute(dashboard: &Dashboard, command: DashCommand) -> CommandResult {
    tracing::debug!("Executing command: {:?}", command);

    match command {
        DashCommand::Connect => calendar::connect(dashboard).await,
        DashCommand::Disconnect => calendar::disconnect(dashboard).await,
        DashCommand::Refresh => calendar::refresh(dashboard).await,
        DashCommand::Quote => widgets::quote(dashboard).await,
        DashCommand::City(city) => widgets::city(dashboard, &city).await,
        DashCommand::Send(recipient) => widgets::send(dashboard, &recipient).await,
        DashCommand::Name(name) => settings::name(dashboard, &name),
        DashCommand::Theme => settings::theme(dashboard),
        DashCommand::Enable(widget) => settings::set_enabled(dashboard, &widget, true).await,
        DashCommand::Disable(widget) => settings::set_enabled(dashboard, &widget, false).await,
        DashCommand::Help => Ok(HELP.iter().map(|line| line.to_string()).collect()),
        DashCommand::Quit => Ok(vec!["Goodbye!".to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verbs_and_arguments() {
        assert_eq!("connect".parse::<DashCommand>().unwrap(), DashCommand::Connect);
        assert_eq!(" Theme ".parse::<DashCommand>().unwrap(), DashCommand::Theme);
        assert_eq!(
            "city  New York ".parse::<DashCommand>().unwrap(),
            DashCommand::City("New York".to_string())
        );
        assert_eq!(
            "send me@example.com".parse::<DashCommand>().unwrap(),
            DashCommand::Send("me@example.com".to_string())
        );
        assert_eq!(
            "disable Quotes".parse::<DashCommand>().unwrap(),
            DashCommand::Disable("quotes".to_string())
        );
    }

    #[test]
    fn test_missing_argument_is_passed_on_blank() {
        assert_eq!(
            "city".parse::<DashCommand>().unwrap(),
            DashCommand::City(String::new())
        );
        assert_eq!(
            "send".parse::<DashCommand>().unwrap(),
            DashCommand::Send(String::new())
        );
    }

    #[test]
    fn test_rejects_unknown_input() {
        assert!(matches!(
            "dance".parse::<DashCommand>(),
            Err(Error::Validation(_))
        ));
        assert!("".parse::<DashCommand>().is_err());
        assert!("enable".parse::<DashCommand>().is_err());
    }
}
