use crate::error::InputError;
use crate::ui::style;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// The person answering questions at the other end of the session.
pub trait Operator {
    /// Ask for the feature request itself.
    fn read_request(&mut self) -> Result<String, InputError>;

    /// Show clarifying question number `round` and block for the answer.
    fn ask(&mut self, round: usize, question: &str) -> Result<String, InputError>;
}

/// Line-oriented operator over any reader/writer pair.
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
}

impl ConsoleOperator<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self, waiting_for: &str) -> Result<String, InputError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed(waiting_for.to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn read_request(&mut self) -> Result<String, InputError> {
        writeln!(self.output, "{}", style::header("Enter your feature request:"))?;
        self.output.flush()?;
        self.read_line("the feature request")
    }

    fn ask(&mut self, round: usize, question: &str) -> Result<String, InputError> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{} {}",
            style::accent(format!("Question {round}:")),
            question.trim()
        )?;
        write!(self.output, "{} ", style::dim(">"))?;
        self.output.flush()?;
        self.read_line(&format!("the answer to question {round}"))
    }
}
