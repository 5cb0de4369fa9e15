use crate::error::{Result, WorkshopError};
use std::io::{self, BufRead, Write};

/// Source of interactive answers.
pub trait Prompter {
    /// Show `prompt` and read one line of input, without the line ending.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Show an informational line.
    fn say(&mut self, message: &str) -> Result<()>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        (**self).ask(prompt)
    }

    fn say(&mut self, message: &str) -> Result<()> {
        (**self).say(message)
    }
}

/// Prompter over a line reader and a writer, normally stdin/stdout
pub struct ConsolePrompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(WorkshopError::InvalidInput("<end of input>".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

/// Interpret a yes/no answer.
///
/// Accepts `y`, `yes`, `n` and `no` in any case. Anything else, blank
/// included, is [`WorkshopError::InvalidInput`].
pub fn parse_yes_no(answer: &str) -> Result<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(WorkshopError::InvalidInput(answer.to_string())),
    }
}

/// Interpret a Game ID answer as a positive app ID.
pub fn parse_game_id(answer: &str) -> Result<u32> {
    match answer.trim().parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(WorkshopError::InvalidInput(answer.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("y").unwrap());
        assert!(parse_yes_no("YES").unwrap());
        assert!(!parse_yes_no(" n ").unwrap());
        assert!(!parse_yes_no("No").unwrap());
        assert!(matches!(
            parse_yes_no(""),
            Err(WorkshopError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_yes_no("maybe"),
            Err(WorkshopError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_game_id() {
        assert_eq!(parse_game_id("400").unwrap(), 400);
        assert_eq!(parse_game_id(" 4000\r").unwrap(), 4000);
        assert!(parse_game_id("").is_err());
        assert!(parse_game_id("0").is_err());
        assert!(parse_game_id("-5").is_err());
        assert!(parse_game_id("portal").is_err());
    }

    #[test]
    fn test_console_prompter_reads_lines() {
        let input = Cursor::new("first\r\nsecond\n");
        let mut output = Vec::new();
        {
            let mut prompter = ConsolePrompter::new(input, &mut output);
            assert_eq!(prompter.ask("A: ").unwrap(), "first");
            assert_eq!(prompter.ask("B: ").unwrap(), "second");
            assert!(prompter.ask("C: ").is_err());
        }
        assert_eq!(String::from_utf8(output).unwrap(), "A: B: C: ");
    }
}
