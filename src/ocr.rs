//! Text recognition capability.
//!
//! Character recognition is outside the crate; [`TextRecognizer`] is the seam
//! where an engine plugs in.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Maps image bytes to recognized text, lines separated by `\n`
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text printed in `image`
    fn recognize(&self, image: &[u8]) -> Result<String>;

    /// Whether the engine can be used at all
    fn is_available(&self) -> bool {
        true
    }
}

/// The `tesseract` command-line engine, fed through stdin and stdout
#[derive(Debug, Clone)]
pub struct TesseractCli {
    program: PathBuf,
    language: String,
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl TesseractCli {
    /// Engine at `program` recognizing English
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            language: "eng".to_owned(),
        }
    }

    /// Recognition language, as a tesseract language code
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl TextRecognizer for TesseractCli {
    fn recognize(&self, image: &[u8]) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(image)?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Recognition(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        log::debug!("recognized {} lines", text.lines().count());
        Ok(text)
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }
}

/// Returns the same text for every image; for callers that already hold
/// recognized text, and for tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticText(pub String);

impl StaticText {
    /// Recognizer answering with `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl TextRecognizer for StaticText {
    fn recognize(&self, _image: &[u8]) -> Result<String> {
        Ok(self.0.clone())
    }
}
