use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use crate::app::{RadiationError, Result};
use crate::render::Renderer;

/// Renders markup with `lynx -dump -nolist -stdin`.
pub struct LynxRenderer {
    command: String,
}

impl LynxRenderer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Renderer for LynxRenderer {
    fn render(&self, markup: &str) -> Result<String> {
        let mut child = Command::new(&self.command)
            .args(["-dump", "-nolist", "-stdin"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RadiationError::Render(format!("failed to start {}: {}", self.command, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RadiationError::Render("child stdin unavailable".into()))?;

        // Feed stdin from another thread so a large body cannot deadlock
        // against a full stdout pipe.
        let input = markup.to_owned();
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| RadiationError::Render(format!("{} failed: {}", self.command, e)))?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(RadiationError::Render(format!(
                    "writing to {} failed: {}",
                    self.command, e
                )))
            }
            Err(_) => return Err(RadiationError::Render("stdin writer panicked".into())),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RadiationError::Render(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
