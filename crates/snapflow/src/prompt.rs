//! Line-oriented input helpers

use std::io::{self, IsTerminal, Write};

/// Print `label` and read one line. `None` on end of input.
pub fn read_line(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// y/N confirmation. Only an explicit `y` accepts; end of input declines.
pub fn confirm(question: &str) -> io::Result<bool> {
    match read_line(&format!("{} [y/N]: ", question))? {
        Some(answer) => Ok(answer.eq_ignore_ascii_case("y")),
        None => Ok(false),
    }
}

/// Wait for Enter before redrawing the menu.
pub fn pause() -> io::Result<()> {
    read_line("Press Enter to continue...").map(|_| ())
}

/// Read a secret without echoing when stdin is a terminal.
///
/// Piped input falls back to a plain line read so the binary stays
/// scriptable. `None` means the user cancelled (Esc or Ctrl-C).
pub fn read_secret(label: &str) -> io::Result<Option<String>> {
    if !io::stdin().is_terminal() {
        return read_line(label);
    }

    print!("{}", label);
    io::stdout().flush()?;

    crossterm::terminal::enable_raw_mode()?;
    let result = read_secret_raw();
    crossterm::terminal::disable_raw_mode()?;
    println!();
    result
}

fn read_secret_raw() -> io::Result<Option<String>> {
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

    let mut secret = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => return Ok(Some(secret)),
                KeyCode::Esc => return Ok(None),
                KeyCode::Backspace => {
                    secret.pop();
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None);
                }
                KeyCode::Char(c) => secret.push(c),
                _ => {}
            }
        }
    }
}
