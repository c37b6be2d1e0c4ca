// UI layer: everything that reads from or writes to the terminal. The
// flows in `session` and `picture` go through the `Terminal` trait so the
// tests can script the user's answers.

use crate::error::Result;
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use qrcode::render::unicode::Dense1x2;
use qrcode::{EcLevel, QrCode};
use std::io::{self, BufRead, Write};
use std::time::Duration;

pub const DISCLAIMER: &str = "This program is intended for educational use only. Users must comply with \
WhatsApp's terms of service and community guidelines. The authors of this program are not affiliated \
with WhatsApp Inc., and this program is not endorsed or approved by WhatsApp Inc.";

pub const CONFIRM_PROMPT: &str = "Would you like to continue (y/n)";

/// The only answer that lets the update go ahead.
pub const ACCEPT_TOKEN: &str = "y";

pub trait Terminal {
    /// Draw a pairing code so it can be scanned from the phone.
    fn show_pairing_code(&mut self, code: &str) -> Result<()>;

    fn show_event(&mut self, event: &str);

    fn status(&mut self, line: &str);

    /// Start a spinner for a step that may take a while.
    fn begin(&mut self, message: &str);

    fn finish(&mut self);

    /// Show the disclaimer and return the raw answer.
    fn confirm(&mut self, disclaimer: &str, prompt: &str) -> Result<String>;

    /// Wait for Enter before exiting.
    fn pause(&mut self);
}

/// Whether a confirmation answer accepts. Case matters; surrounding
/// whitespace does not.
pub fn is_accept(answer: &str) -> bool {
    answer.trim() == ACCEPT_TOKEN
}

/// Render `data` with half-block characters, light modules on dark, so a
/// phone can scan it off a dark terminal.
pub fn render_qr(data: &str) -> Result<String> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

/// Real terminal: dialoguer prompts, an indicatif spinner and plain
/// stdout for everything else. When stdin is not a tty, answers are read
/// line by line from it instead of through dialoguer.
#[derive(Default)]
pub struct ConsoleTerminal {
    spinner: Option<ProgressBar>,
    input: Option<Box<dyn BufRead>>,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        let stdin = io::stdin();
        if stdin.is_tty() {
            Self::default()
        } else {
            Self::with_input(stdin.lock())
        }
    }

    /// Read answers from `input` rather than the console.
    pub fn with_input(input: impl BufRead + 'static) -> Self {
        ConsoleTerminal {
            spinner: None,
            input: Some(Box::new(input)),
        }
    }

    /// One line of input, without its line ending. Empty at end of input.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        let input = match self.input.as_mut() {
            Some(input) => input,
            None => {
                return Ok(Input::new()
                    .with_prompt(prompt)
                    .allow_empty(true)
                    .interact_text()?)
            }
        };
        print!("{}: ", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Terminal for ConsoleTerminal {
    fn show_pairing_code(&mut self, code: &str) -> Result<()> {
        println!("{}", render_qr(code)?);
        Ok(())
    }

    fn show_event(&mut self, event: &str) {
        println!("Login event: {}", event);
    }

    fn status(&mut self, line: &str) {
        match &self.spinner {
            Some(spinner) => spinner.println(line),
            None => println!("{}", line),
        }
    }

    fn begin(&mut self, message: &str) {
        let style = ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner());
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn finish(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn confirm(&mut self, disclaimer: &str, prompt: &str) -> Result<String> {
        self.finish();
        println!("\n{} {}", "DISCLAIMER:".yellow().bold(), disclaimer);
        self.ask(prompt)
    }

    fn pause(&mut self) {
        self.finish();
        let _ = self.ask("Press Enter to exit");
    }
}
