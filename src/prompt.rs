use crossterm::{
    event::{
        self,
        Event,
        KeyCode,
        KeyEvent,
        KeyEventKind,
        KeyModifiers,
    },
    terminal,
};
use eyre::{
    bail,
    Context as _,
    Result,
};
use std::io::{
    self,
    Write as _,
};

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Submit,
    Cancel,
}

/// Reads a password from the terminal without echoing it.
pub(crate) fn read_password(prompt: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    terminal::enable_raw_mode().context("Failed to switch the terminal to raw mode")?;
    defer! {
        let _ = terminal::disable_raw_mode();
        eprintln!();
    }

    let mut password = String::new();
    loop {
        let Event::Key(key) = event::read().context("Failed to read from the terminal")? else {
            continue;
        };
        match apply_key(&mut password, key) {
            Step::Continue => {}
            Step::Submit => return Ok(password),
            Step::Cancel => bail!("Password prompt was cancelled"),
        }
    }
}

fn apply_key(password: &mut String, key: KeyEvent) -> Step {
    if key.kind == KeyEventKind::Release {
        return Step::Continue;
    }
    match key.code {
        KeyCode::Enter => Step::Submit,
        KeyCode::Esc => Step::Cancel,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Step::Cancel,
        KeyCode::Backspace => {
            password.pop();
            Step::Continue
        }
        KeyCode::Char(c) => {
            password.push(c);
            Step::Continue
        }
        _ => Step::Continue,
    }
}
