//! Human input capability used by the construction engine.

use std::io::{self, BufRead, Cursor, Write};

use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Synchronous source of human answers plus a narration channel.
///
/// Every read blocks until an acceptable answer is supplied. An input
/// source that runs dry reports [`CoreError::InputExhausted`] instead of
/// looping forever.
pub trait Prompter {
    /// Show a progress or informational message.
    fn say(&mut self, message: &str) -> CoreResult<()>;

    /// Read an integer within `lower..=upper`.
    fn read_choice_in_range(&mut self, prompt: &str, lower: i64, upper: i64) -> CoreResult<i64>;

    /// Read any text, possibly empty.
    fn read_text(&mut self, prompt: &str) -> CoreResult<String>;

    /// Read a yes/no answer.
    fn read_yes_no(&mut self, prompt: &str) -> CoreResult<bool>;

    /// Read text restricted to `choices` when they are non-empty.
    ///
    /// An empty answer is accepted only when `required` is false.
    fn read_text_with_choices(
        &mut self,
        prompt: &str,
        required: bool,
        choices: &[String],
    ) -> CoreResult<String>;
}

/// Line-oriented prompter: writes prompts to `output`, reads one answer per
/// line from `input`.
///
/// Only the line terminator is removed; any other whitespace is part of the
/// answer.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> CoreResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input exhausted at prompt {:?}", prompt);
            return Err(CoreError::InputExhausted);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn reject(&mut self, message: &str) -> CoreResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl LinePrompter<Cursor<Vec<u8>>, io::Sink> {
    /// Prompter that answers from a fixed list of lines and discards output.
    pub fn scripted<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut script = String::new();
        for line in lines {
            script.push_str(line.as_ref());
            script.push('\n');
        }
        Self::new(Cursor::new(script.into_bytes()), io::sink())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn say(&mut self, message: &str) -> CoreResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn read_choice_in_range(&mut self, prompt: &str, lower: i64, upper: i64) -> CoreResult<i64> {
        loop {
            let answer = self.ask(prompt)?;
            match answer.trim().parse::<i64>() {
                Ok(n) if (lower..=upper).contains(&n) => return Ok(n),
                _ => self.reject(&format!("Enter a number between {} and {}.", lower, upper))?,
            }
        }
    }

    fn read_text(&mut self, prompt: &str) -> CoreResult<String> {
        self.ask(prompt)
    }

    fn read_yes_no(&mut self, prompt: &str) -> CoreResult<bool> {
        let prompt = format!("{} [y/n]: ", prompt);
        loop {
            let answer = self.ask(&prompt)?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.reject("Please answer y or n.")?,
            }
        }
    }

    fn read_text_with_choices(
        &mut self,
        prompt: &str,
        required: bool,
        choices: &[String],
    ) -> CoreResult<String> {
        if !choices.is_empty() {
            self.say(&format!("Choices: {}", choices.join(", ")))?;
        }
        loop {
            let answer = self.ask(prompt)?;
            if answer.is_empty() {
                if !required {
                    return Ok(answer);
                }
                self.reject("A value is required.")?;
            } else if choices.is_empty() || choices.contains(&answer) {
                return Ok(answer);
            } else {
                self.reject(&format!(
                    "'{}' is not one of: {}",
                    answer,
                    choices.join(", ")
                ))?;
            }
        }
    }
}
