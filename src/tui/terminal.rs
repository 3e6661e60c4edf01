use std::io::{self, BufRead, Stdout, Write};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};

/// Line-at-a-time terminal used by the session loop.
pub trait LineTerminal {
    /// Read one line without its terminator. `Ok(None)` means end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
    fn write(&mut self, text: &str) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
    fn set_prompt(&mut self, prompt: &str);
}

/// Raw-mode line editor on the controlling terminal.
///
/// Raw mode is entered on [`CrosstermTerminal::setup`] and left when the
/// value is dropped, whichever way the loop exits.
pub struct CrosstermTerminal {
    stdout: Stdout,
    prompt: String,
}

impl CrosstermTerminal {
    pub fn setup() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self {
            stdout: io::stdout(),
            prompt: "> ".to_string(),
        })
    }

    fn erase(&mut self, chars: usize) -> io::Result<()> {
        for _ in 0..chars {
            queue!(self.stdout, Print("\x08 \x08"))?;
        }
        self.stdout.flush()
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

impl LineTerminal for CrosstermTerminal {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        execute!(self.stdout, Print(&self.prompt))?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            match key.code {
                KeyCode::Enter => {
                    execute!(self.stdout, Print("\r\n"))?;
                    return Ok(Some(line));
                }
                KeyCode::Char('d') if ctrl && line.is_empty() => {
                    execute!(self.stdout, Print("\r\n"))?;
                    return Ok(None);
                }
                KeyCode::Char('c') if ctrl => {
                    execute!(self.stdout, Print("\r\n"))?;
                    return Ok(None);
                }
                KeyCode::Char('u') if ctrl => {
                    let len = line.chars().count();
                    line.clear();
                    self.erase(len)?;
                }
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        self.erase(1)?;
                    }
                }
                KeyCode::Char(c) if !ctrl => {
                    line.push(c);
                    execute!(self.stdout, Print(c))?;
                }
                _ => {}
            }
        }
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        // Raw mode does not translate \n into a carriage return
        queue!(self.stdout, Print(text.replace('\n', "\r\n")))?;
        self.stdout.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }
}

/// Buffered line terminal for pipes and scripts. Clearing is a no-op.
pub struct PlainTerminal<R, W> {
    input: R,
    output: W,
    prompt: String,
}

impl<R: BufRead, W: Write> PlainTerminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            prompt: "> ".to_string(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> LineTerminal for PlainTerminal<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.write_all(self.prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }
}
