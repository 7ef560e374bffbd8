//! Line-oriented shell standing in for the mobile screens.
//!
//! Route decisions are printed as they change; every other line is an
//! intent from one of the screens.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use nt_core::goals::GoalFormInput;
use nt_core::RouteDecision;

use crate::bootstrap::AppRuntime;
use crate::commands::{account, home, navigation, profile, settings, CommandError};

const HELP: &str = "\
commands:
  register <email> <password>     create an account
  login <email> <password>        sign in
  guest                           continue without an account
  setup <username>                finish profile setup
  home                            show the greeting
  calc <height> <weight> <age> <activity> <gender>
  settings                        show saved settings
  save-settings <height> <weight> <age> <activity> <gender>
  footer <home|settings|profile>  press a footer tab
  route                           show the current route
  logout | delete | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Register { email: String, password: String },
    Login { email: String, password: String },
    Guest,
    Setup { username: String },
    Home,
    Calculate(GoalFormInput),
    ShowSettings,
    SaveSettings(GoalFormInput),
    Footer(String),
    Route,
    Logout,
    Delete,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (name, args.as_slice()) {
        ("register", [email, password]) => ConsoleCommand::Register {
            email: email.to_string(),
            password: password.to_string(),
        },
        ("login", [email, password]) => ConsoleCommand::Login {
            email: email.to_string(),
            password: password.to_string(),
        },
        ("guest", []) => ConsoleCommand::Guest,
        // The username may contain spaces; blank is rejected by the use case.
        ("setup", rest) => ConsoleCommand::Setup {
            username: rest.join(" "),
        },
        ("home", []) => ConsoleCommand::Home,
        ("calc", [h, w, a, act, g]) => ConsoleCommand::Calculate(form(h, w, a, act, g)),
        ("settings", []) => ConsoleCommand::ShowSettings,
        ("save-settings", [h, w, a, act, g]) => {
            ConsoleCommand::SaveSettings(form(h, w, a, act, g))
        }
        ("footer", [tab]) => ConsoleCommand::Footer(tab.to_string()),
        ("route", []) => ConsoleCommand::Route,
        ("logout", []) => ConsoleCommand::Logout,
        ("delete", []) => ConsoleCommand::Delete,
        ("help", _) => ConsoleCommand::Help,
        ("quit" | "exit", _) => ConsoleCommand::Quit,
        (other, _) => return Err(format!("unrecognized command `{other}`, try `help`")),
    };
    Ok(Some(command))
}

fn form(height: &str, weight: &str, age: &str, activity: &str, gender: &str) -> GoalFormInput {
    GoalFormInput {
        height: height.to_string(),
        weight: weight.to_string(),
        age: age.to_string(),
        activity: activity.to_string(),
        gender: gender.to_string(),
    }
}

pub fn describe_decision(decision: &RouteDecision) -> String {
    let mut text = format!("route: {}", decision.initial_route.name());
    if let Some(redirect) = decision.redirect_route {
        text.push_str(&format!(" -> {}", redirect.name()));
    }
    if decision.provisional {
        text.push_str(" (provisional)");
    }
    text
}

fn describe_error(err: &CommandError) -> String {
    match err.route_hint {
        Some(route) => format!("error: {} [go to {}]", err.message, route.name()),
        None => format!("error: {}", err.message),
    }
}

/// Run the shell until stdin closes or `quit` is entered.
pub async fn run_console(runtime: Arc<AppRuntime>) -> anyhow::Result<()> {
    let session = runtime.start().await;

    let mut decisions = runtime.gate().decisions();
    let printer = tokio::spawn(async move {
        loop {
            let latest = decisions.borrow_and_update().clone();
            if let Some(decision) = latest {
                println!("{}", describe_decision(&decision));
            }
            if decisions.changed().await.is_err() {
                break;
            }
        }
    });

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        debug!(?command, "console command");
        if command == ConsoleCommand::Quit {
            break;
        }
        println!("{}", execute(&runtime, command).await);
    }

    printer.abort();
    session.stop();
    Ok(())
}

async fn execute(runtime: &AppRuntime, command: ConsoleCommand) -> String {
    let outcome: Result<String, CommandError> = match command {
        ConsoleCommand::Register { email, password } => {
            account::register(runtime, &email, &password)
                .await
                .map(|identity| format!("registered {}", identity.uid))
        }
        ConsoleCommand::Login { email, password } => account::login(runtime, &email, &password)
            .await
            .map(|identity| format!("signed in as {}", identity.uid)),
        ConsoleCommand::Guest => Ok(match account::continue_as_guest(runtime).await {
            Some(_) => "continuing as guest".to_string(),
            None => "already signed in".to_string(),
        }),
        ConsoleCommand::Setup { username } => {
            profile::complete_profile_setup(runtime, &username)
                .await
                .map(|()| "profile saved".to_string())
        }
        ConsoleCommand::Home => Ok(home::greeting(runtime).await),
        ConsoleCommand::Calculate(input) => settings::calculate_goals(runtime, &input)
            .map(|goals| {
                format!(
                    "calories: {} kcal, water: {} ml",
                    goals.daily_calories, goals.daily_water_ml
                )
            }),
        ConsoleCommand::ShowSettings => settings::load_settings(runtime).await.map(|view| {
            match view.goals {
                Some(goals) => format!(
                    "height {} weight {} age {} activity {} gender {}: {} kcal, {} ml",
                    view.form.height,
                    view.form.weight,
                    view.form.age,
                    view.form.activity,
                    view.form.gender,
                    goals.daily_calories,
                    goals.daily_water_ml
                ),
                None => "no settings saved".to_string(),
            }
        }),
        ConsoleCommand::SaveSettings(input) => settings::save_settings(runtime, &input)
            .await
            .map(|saved| {
                format!(
                    "Settings saved successfully! ({} kcal, {} ml)",
                    saved.daily_calories, saved.daily_water
                )
            }),
        ConsoleCommand::Footer(tab) => {
            navigation::footer_target(runtime, &tab).map(|route| format!("open {}", route.name()))
        }
        ConsoleCommand::Route => Ok(match navigation::current_route(runtime) {
            Some(decision) => describe_decision(&decision),
            None => "route: undetermined".to_string(),
        }),
        ConsoleCommand::Logout => account::logout(runtime)
            .await
            .map(|()| "signed out".to_string()),
        ConsoleCommand::Delete => account::delete_account(runtime)
            .await
            .map(|()| "account deleted".to_string()),
        ConsoleCommand::Help => Ok(HELP.to_string()),
        ConsoleCommand::Quit => Ok(String::new()),
    };
    outcome.unwrap_or_else(|err| describe_error(&err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nt_core::Route;

    #[test]
    fn test_parse_credentials_commands() {
        assert_eq!(
            parse_command("login a@b.co secret1").unwrap(),
            Some(ConsoleCommand::Login {
                email: "a@b.co".to_string(),
                password: "secret1".to_string(),
            })
        );
        assert!(parse_command("login only-email").is_err());
    }

    #[test]
    fn test_parse_setup_keeps_inner_spaces() {
        assert_eq!(
            parse_command("setup  Ada  Lovelace ").unwrap(),
            Some(ConsoleCommand::Setup {
                username: "Ada Lovelace".to_string(),
            })
        );
        assert_eq!(
            parse_command("setup").unwrap(),
            Some(ConsoleCommand::Setup {
                username: String::new(),
            })
        );
    }

    #[test]
    fn test_parse_calc_builds_form() {
        let parsed = parse_command("calc 175 70 25 moderate male").unwrap();

        assert_eq!(
            parsed,
            Some(ConsoleCommand::Calculate(form("175", "70", "25", "moderate", "male")))
        );
    }

    #[test]
    fn test_blank_and_unknown_lines() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert!(parse_command("dance").unwrap_err().contains("dance"));
    }

    #[test]
    fn test_describe_decision_shows_redirect_and_provisional() {
        let decision = RouteDecision {
            initial_route: Route::Home,
            redirect_route: Some(Route::UserSetup),
            provisional: true,
        };

        assert_eq!(
            describe_decision(&decision),
            "route: Home -> UserSetup (provisional)"
        );
    }
}
