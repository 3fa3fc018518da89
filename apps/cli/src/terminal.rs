//! # Terminal
//!
//! Console I/O for the menus: prompts, reprompting on malformed input and
//! the tab-separated table format.
//!
//! Input is read asynchronously so the whole menu loop can be raced against
//! Ctrl+C. Output goes through plain `Write` handles; tests swap all three
//! streams for in-memory buffers.
//!
//! ## Table Format
//! ```text
//! storeID\tlatitude\tlongitude\t      ← header, printed with the first row
//! 1\t10\t40\t
//! 3\t40\t10\t
//! Total row(s): 2
//! ```

use std::io::Write;
use std::str::FromStr;

use storeline_db::Table;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::error::{CliError, CliResult};

pub const CHOICE_PROMPT: &str = "Please make your choice: ";
pub const INVALID_INPUT: &str = "Your input is invalid!";
pub const UNRECOGNIZED_CHOICE: &str = "Unrecognized choice!";

/// Input, output and error streams of one console session.
pub struct Terminal {
    input: Box<dyn AsyncBufRead + Unpin + Send>,
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

impl Terminal {
    pub fn new(
        input: Box<dyn AsyncBufRead + Unpin + Send>,
        out: Box<dyn Write + Send>,
        err: Box<dyn Write + Send>,
    ) -> Self {
        Terminal { input, out, err }
    }

    /// The process's stdin / stdout / stderr.
    pub fn stdio() -> Self {
        Self::new(
            Box::new(BufReader::new(tokio::io::stdin())),
            Box::new(std::io::stdout()),
            Box::new(std::io::stderr()),
        )
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Reads one line without its terminator.
    ///
    /// ## Returns
    /// * `Err(CliError::InputClosed)` - End of input
    pub async fn read_line(&mut self) -> CliResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(CliError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Prints `\t<label>: ` and reads the answer.
    pub async fn prompt(&mut self, label: &str) -> CliResult<String> {
        write!(self.out, "\t{label}: ")?;
        self.out.flush()?;
        self.read_line().await
    }

    /// Prompts until the answer parses as `T`.
    pub async fn prompt_parse<T: FromStr>(&mut self, label: &str) -> CliResult<T> {
        loop {
            let answer = self.prompt(label).await?;
            match answer.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(INVALID_INPUT)?,
            }
        }
    }

    /// Yes/no question; anything starting with `y` or `Y` is yes.
    pub async fn confirm(&mut self, label: &str) -> CliResult<bool> {
        let answer = self.prompt(&format!("{label} Y/N")).await?;
        Ok(answer.trim_start().starts_with(['y', 'Y']))
    }

    /// Reads a menu choice, reprompting until it is an integer.
    pub async fn read_choice(&mut self) -> CliResult<i32> {
        loop {
            write!(self.out, "{CHOICE_PROMPT}")?;
            self.out.flush()?;
            match self.read_line().await?.trim().parse() {
                Ok(choice) => return Ok(choice),
                Err(_) => self.say(INVALID_INPUT)?,
            }
        }
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Writes one line to the output stream.
    pub fn say(&mut self, line: impl AsRef<str>) -> CliResult<()> {
        writeln!(self.out, "{}", line.as_ref())?;
        Ok(())
    }

    /// Writes one line to the error stream.
    pub fn complain(&mut self, line: impl AsRef<str>) -> CliResult<()> {
        writeln!(self.err, "{}", line.as_ref())?;
        Ok(())
    }

    /// Prints `table` followed by `Total row(s): N` and returns N.
    pub fn print_table(&mut self, table: &Table) -> CliResult<usize> {
        for (index, row) in table.rows().iter().enumerate() {
            if index == 0 {
                for column in table.columns() {
                    write!(self.out, "{column}\t")?;
                }
                writeln!(self.out)?;
            }
            for value in row.values() {
                write!(self.out, "{value}\t")?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out, "Total row(s): {}", table.len())?;
        Ok(table.len())
    }
}

#[cfg(test)]
pub(crate) mod capture {
    //! In-memory streams for tests.

    use std::io::{self, Cursor, Write};
    use std::sync::{Arc, Mutex};

    use super::Terminal;

    /// Shared byte buffer usable as an output stream.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// A terminal fed from `input`, with captured output and error streams.
    pub(crate) fn scripted(input: &str) -> (Terminal, Capture, Capture) {
        let out = Capture::default();
        let err = Capture::default();
        let terminal = Terminal::new(
            Box::new(Cursor::new(input.as_bytes().to_vec())),
            Box::new(out.clone()),
            Box::new(err.clone()),
        );
        (terminal, out, err)
    }
}

#[cfg(test)]
mod tests {
    use super::capture::scripted;
    use super::*;
    use storeline_db::Row;

    #[tokio::test]
    async fn test_read_choice_reprompts() {
        let (mut term, out, _) = scripted("abc\n\n7\n");
        assert_eq!(term.read_choice().await.unwrap(), 7);

        let printed = out.contents();
        assert_eq!(printed.matches(CHOICE_PROMPT).count(), 3);
        assert_eq!(printed.matches(INVALID_INPUT).count(), 2);
    }

    #[tokio::test]
    async fn test_end_of_input() {
        let (mut term, _, _) = scripted("only\n");
        assert_eq!(term.read_line().await.unwrap(), "only");
        assert!(matches!(
            term.read_line().await,
            Err(CliError::InputClosed)
        ));
    }

    #[tokio::test]
    async fn test_prompt_parse_and_crlf() {
        let (mut term, out, _) = scripted("x\r\n4.75\r\n");
        let price: f64 = term.prompt_parse("Enter price").await.unwrap();
        assert_eq!(price, 4.75);
        assert!(out.contents().starts_with("\tEnter price: "));
    }

    #[tokio::test]
    async fn test_confirm() {
        let (mut term, _, _) = scripted("Y\nno\nyes\n");
        assert!(term.confirm("Update?").await.unwrap());
        assert!(!term.confirm("Update?").await.unwrap());
        assert!(term.confirm("Update?").await.unwrap());
    }

    #[test]
    fn test_print_table() {
        let (mut term, out, _) = scripted("");
        let table = Table::new(
            vec!["storeID".into(), "name".into()],
            vec![
                Row::new(vec!["1".into(), "North".into()]),
                Row::new(vec!["3".into(), "null".into()]),
            ],
        );

        assert_eq!(term.print_table(&table).unwrap(), 2);
        assert_eq!(
            out.contents(),
            "storeID\tname\t\n1\tNorth\t\n3\tnull\t\nTotal row(s): 2\n"
        );
    }

    #[test]
    fn test_print_empty_table_has_no_header() {
        let (mut term, out, _) = scripted("");
        term.print_table(&Table::default()).unwrap();
        assert_eq!(out.contents(), "Total row(s): 0\n");
    }

    #[test]
    fn test_complain_uses_error_stream() {
        let (mut term, out, err) = scripted("");
        term.complain("boom").unwrap();
        assert_eq!(err.contents(), "boom\n");
        assert!(out.contents().is_empty());
    }
}
