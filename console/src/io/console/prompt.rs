use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/// Raised when the input stream ends while a prompt is waiting
#[derive(Debug, Error)]
#[error("Input closed")]
pub struct InputClosed;

/// Line-oriented prompts over any reader/writer pair.
///
/// Malformed numeric input never leaves this type: the prompt is repeated
/// until the answer parses and passes the check.
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write text followed by a newline
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print the prompt and read one line without its line ending.
    /// `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Free text answer, kept exactly as typed
    pub fn prompt_text(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)?.ok_or_else(|| InputClosed.into())
    }

    /// Repeat `prompt` until the trimmed answer parses as `T` and passes `accept`.
    /// After a bad answer `retry_prompt` is shown instead.
    pub fn prompt_parsed<T, F>(&mut self, prompt: &str, retry_prompt: &str, accept: F) -> Result<T>
    where
        T: FromStr,
        F: Fn(&T) -> bool,
    {
        let mut current = prompt;
        loop {
            let answer = self.prompt_text(current)?;
            match answer.trim().parse::<T>() {
                Ok(value) if accept(&value) => return Ok(value),
                _ => current = retry_prompt,
            }
        }
    }

    /// Any whole number, used for ids and thresholds
    pub fn prompt_integer(&mut self, prompt: &str) -> Result<i64> {
        self.prompt_parsed(prompt, "Invalid number. Please enter a whole number: ", |_: &i64| true)
    }

    pub fn prompt_price(&mut self, prompt: &str) -> Result<f64> {
        self.prompt_parsed(prompt, "Invalid price. Please enter a positive number: ", |price: &f64| {
            price.is_finite() && *price >= 0.0
        })
    }

    pub fn prompt_quantity(&mut self, prompt: &str) -> Result<i64> {
        self.prompt_parsed(prompt, "Invalid quantity. Please enter a positive number: ", |quantity: &i64| {
            *quantity >= 0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_text_keeps_spaces_and_strips_line_ending() {
        let mut p = prompter("  Claw Hammer \r\n");
        assert_eq!(p.prompt_text("Name: ").unwrap(), "  Claw Hammer ");
        assert_eq!(output(p), "Name: ");
    }

    #[test]
    fn test_price_reprompts_until_valid() {
        let mut p = prompter("abc\n-3\n\n 4.25 \n");
        assert_eq!(p.prompt_price("Price: ").unwrap(), 4.25);

        let text = output(p);
        assert_eq!(text.matches("Invalid price. Please enter a positive number: ").count(), 3);
    }

    #[test]
    fn test_quantity_rejects_negative_and_fractions() {
        let mut p = prompter("-1\n2.5\n0\n");
        assert_eq!(p.prompt_quantity("Quantity: ").unwrap(), 0);
    }

    #[test]
    fn test_integer_accepts_negative() {
        let mut p = prompter("x\n-7\n");
        assert_eq!(p.prompt_integer("ID: ").unwrap(), -7);
    }

    #[test]
    fn test_end_of_input_is_input_closed() {
        let mut p = prompter("nope\n");
        let err = p.prompt_price("Price: ").unwrap_err();
        assert!(err.downcast_ref::<InputClosed>().is_some());

        let mut p = prompter("");
        assert!(p.read_line("> ").unwrap().is_none());
    }
}
