use crate::cli::{Prompter, Settings};
use crate::error::Result;
use crate::models::{find_option, max_key, MenuOption, MenuSection, Platform, EXIT_KEY, MENU};
use crate::shell::{CommandOutcome, CommandRunner};
use clap::Parser;
use colored::*;
use tracing::{debug, info};

/// Interactive menu for the everyday commands of a static website project.
///
/// Takes no arguments: run it from the project root and pick an action.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Environment:\n  SITE_MENU_RUNNER   package script runner (default: npm)\n  SITE_MENU_LOG_DIR  write logs to a daily file in this directory\n  RUST_LOG           log filter (default: error)"
)]
pub struct Cli {}

/// What the user typed at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<'a> {
    Exit,
    Run(&'static MenuOption),
    Invalid(&'a str),
}

impl<'a> Choice<'a> {
    /// Classifies trimmed menu input.
    pub fn parse(input: &'a str) -> Self {
        if input == EXIT_KEY {
            return Choice::Exit;
        }
        match find_option(input) {
            Some(option) => Choice::Run(option),
            None => Choice::Invalid(input),
        }
    }
}

/// Why the menu loop ended. Both end the process with status 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user chose the exit key.
    Requested,
    /// The user pressed Ctrl+C at a prompt.
    Interrupted,
}

/// Renders the banner, every section and the exit entry.
pub fn render_menu(sections: &[MenuSection]) -> String {
    let rule = "=".repeat(50);
    let mut out = String::new();

    out.push_str(&format!("{}\n", rule.cyan()));
    out.push_str(&format!("{}\n", "Website Management Menu".cyan().bold()));
    out.push_str(&format!("{}\n", rule.cyan()));

    for section in sections {
        out.push_str(&format!("\n{}\n", format!("{}:", section.title).bold()));
        for option in section.options {
            out.push_str(&format!("{}. {}\n", option.key, option.label));
        }
    }

    out.push_str(&format!("\n{}. Exit\n", EXIT_KEY));
    out
}

/// The menu loop: render, read a key, dispatch, repeat.
///
/// Generic over the terminal and the process runner so the dispatch logic can be
/// exercised without a TTY or a shell.
pub struct App<R, P> {
    settings: Settings,
    platform: Platform,
    runner: R,
    prompter: P,
}

impl<R: CommandRunner, P: Prompter> App<R, P> {
    /// Creates the menu. `platform` is resolved once by the caller and never re-checked.
    pub fn new(settings: Settings, platform: Platform, runner: R, prompter: P) -> Self {
        info!(
            "Menu ready (platform: {}, runner: {})",
            platform, settings.runner
        );
        Self {
            settings,
            platform,
            runner,
            prompter,
        }
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Runs until the user picks the exit key or presses Ctrl+C at a prompt.
    ///
    /// # Errors
    ///
    /// Only terminal failures other than an interrupt are returned. Failing or
    /// interrupted commands are reported on screen and the loop continues.
    pub async fn run(&self) -> Result<ExitReason> {
        loop {
            match self.step().await {
                Ok(Some(reason)) => return Ok(reason),
                Ok(None) => continue,
                Err(e) if e.is_interrupt() => {
                    info!("Interrupted at prompt, exiting");
                    println!("\n\n{}", "Interrupted. Goodbye!".green());
                    return Ok(ExitReason::Interrupted);
                },
                Err(e) => return Err(e),
            }
        }
    }

    /// One iteration of the loop. Returns `Some` when the loop should end.
    async fn step(&self) -> Result<Option<ExitReason>> {
        self.prompter.clear_screen()?;
        println!("{}", render_menu(MENU));

        let prompt = format!("Choose an action ({}-{})", EXIT_KEY, max_key());
        let input = self.prompter.read_choice(&prompt)?;

        match Choice::parse(&input) {
            Choice::Exit => {
                info!("Exit requested");
                println!("\n{}", "Exiting. Goodbye!".green());
                Ok(Some(ExitReason::Requested))
            },
            Choice::Run(option) => {
                self.dispatch(option).await?;
                Ok(None)
            },
            Choice::Invalid(input) => {
                info!("Invalid menu choice: {:?}", input);
                println!("\n{}", "Invalid choice, please try again".red());
                self.prompter.pause("Press any key to continue...")?;
                Ok(None)
            },
        }
    }

    /// Runs the command behind `option`, reports how it ended and waits for a key press.
    pub async fn dispatch(&self, option: &MenuOption) -> Result<CommandOutcome> {
        let command = option.action.command(self.platform, &self.settings.runner);
        debug!("Key {} resolved to `{}`", option.key, command);
        info!("Running option {} ({})", option.key, option.label);

        let outcome = self.runner.run(&command).await;
        outcome.report();

        self.prompter.pause("\nPress any key to return to the menu...")?;
        Ok(outcome)
    }
}
