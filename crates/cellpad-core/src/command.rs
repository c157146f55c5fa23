//! Text commands shared by the TUI command line and the non-interactive
//! `-c` mode.
//!
//! ```text
//! set A1 hello        fx =SUM(A1:A3)      =AVG(A1:B1)
//! addrow  addcol      insrow 3  inscol B  delrow 3  delcol B
//! dedupe              replace cat dog     replace "a b" ""
//! bold A1  italic A1  upper A1  lower A1  trim A1
//! show                goto B7             q
//! ```

use crate::document::{Document, Format};
use crate::error::{CellpadError, Result};
use cellpad_engine::GridError;
use cellpad_engine::engine::{Address, format_number};

/// A parsed command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Set { address: String, text: String },
    Evaluate(String),
    AddRow,
    AddColumn,
    InsertRow(usize),
    InsertColumn(usize),
    DeleteRow(usize),
    DeleteColumn(usize),
    Dedupe,
    Replace { find: String, replace: String },
    Format { format: Format, address: String },
    Show,
    Goto(Address),
    Quit,
}

/// What the caller should do after running a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    None,
    /// Text to show the user (a formula result, a summary, a table).
    Text(String),
    /// Move the cursor to this cell.
    Goto(Address),
    Quit,
}

/// Split arguments on whitespace, honouring `"..."` quoting with `\"` and
/// `\\` escapes. A quoted empty string yields an empty argument.
fn split_args(input: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut chars = input.chars().peekable();
    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let Some(&first) = chars.peek() else {
            break;
        };
        let mut arg = String::new();
        if first == '"' {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some(escaped) => arg.push(escaped),
                        None => break,
                    },
                    _ => arg.push(c),
                }
            }
            if !closed {
                return Err(CellpadError::Usage("unterminated quote"));
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                arg.push(c);
                chars.next();
            }
        }
        args.push(arg);
    }
    Ok(args)
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

fn parse_row(arg: Option<&str>, usage: &'static str) -> Result<usize> {
    arg.and_then(|a| a.parse::<usize>().ok())
        .ok_or(CellpadError::Usage(usage))
}

/// Columns may be given as letters (`C`) or as a 1-based number (`3`).
fn parse_column(arg: Option<&str>, usage: &'static str) -> Result<usize> {
    let arg = arg.ok_or(CellpadError::Usage(usage))?;
    arg.parse::<usize>()
        .ok()
        .or_else(|| Address::letters_to_col(&arg.to_ascii_uppercase()))
        .ok_or(CellpadError::Usage(usage))
}

fn single_address(args: Option<&str>, usage: &'static str) -> Result<String> {
    match args.map(str::trim) {
        Some(a) if !a.is_empty() && !a.contains(char::is_whitespace) => Ok(a.to_string()),
        _ => Err(CellpadError::Usage(usage)),
    }
}

impl Command {
    /// Parse one command line. A leading `:` is ignored.
    pub fn parse(input: &str) -> Result<Command> {
        let input = input.trim();
        let input = input.strip_prefix(':').unwrap_or(input).trim_start();
        if input.starts_with('=') {
            return Ok(Command::Evaluate(input.to_string()));
        }

        let (command, args) = match input.split_once(char::is_whitespace) {
            Some((c, rest)) => (c, Some(rest.trim())),
            None => (input, None),
        };
        let no_args = args.is_none_or(str::is_empty);

        match command {
            "set" => {
                let usage = "set ADDR TEXT";
                let args = args.ok_or(CellpadError::Usage(usage))?;
                let (address, text) = match args.split_once(char::is_whitespace) {
                    Some((a, t)) => (a, unquote(t.trim_start())),
                    None => (args, ""),
                };
                if address.is_empty() {
                    return Err(CellpadError::Usage(usage));
                }
                Ok(Command::Set {
                    address: address.to_string(),
                    text: text.to_string(),
                })
            }
            "fx" => match args {
                Some(f) if !f.is_empty() => Ok(Command::Evaluate(f.to_string())),
                _ => Err(CellpadError::Usage("fx =FN(START:END)")),
            },
            "addrow" if no_args => Ok(Command::AddRow),
            "addcol" if no_args => Ok(Command::AddColumn),
            "insrow" => Ok(Command::InsertRow(parse_row(args, "insrow N")?)),
            "inscol" => Ok(Command::InsertColumn(parse_column(args, "inscol COL")?)),
            "delrow" => Ok(Command::DeleteRow(parse_row(args, "delrow N")?)),
            "delcol" => Ok(Command::DeleteColumn(parse_column(args, "delcol COL")?)),
            "dedupe" if no_args => Ok(Command::Dedupe),
            "replace" => {
                let parts = split_args(args.unwrap_or(""))?;
                match <[String; 2]>::try_from(parts) {
                    Ok([find, replace]) => Ok(Command::Replace { find, replace }),
                    Err(_) => Err(CellpadError::Usage("replace FIND REPLACE")),
                }
            }
            "show" if no_args => Ok(Command::Show),
            "goto" | "g" => {
                let target = single_address(args, "goto ADDR")?;
                let address = target
                    .parse::<Address>()
                    .map_err(CellpadError::Grid)?;
                Ok(Command::Goto(address))
            }
            "q" | "quit" if no_args => Ok(Command::Quit),
            name => match Format::from_name(name) {
                Some(format) => Ok(Command::Format {
                    format,
                    address: single_address(args, "bold|italic|upper|lower|trim ADDR")?,
                }),
                None => {
                    tracing::warn!(command = %input, "unknown command");
                    Err(CellpadError::UnknownCommand(input.to_string()))
                }
            },
        }
    }
}

impl Document {
    /// Run a parsed command against this document.
    pub fn run(&mut self, command: Command) -> Result<Outcome> {
        tracing::debug!(?command, "running command");
        match command {
            Command::Set { address, text } => {
                self.set_text(&address, &text)?;
                Ok(Outcome::None)
            }
            Command::Evaluate(formula) => Ok(Outcome::Text(format_number(self.evaluate(&formula)?))),
            Command::AddRow => {
                self.insert_row_at_end();
                Ok(Outcome::None)
            }
            Command::AddColumn => {
                self.insert_column_at_end();
                Ok(Outcome::None)
            }
            Command::InsertRow(at) => {
                self.insert_row(at)?;
                Ok(Outcome::None)
            }
            Command::InsertColumn(at) => {
                self.insert_column(at)?;
                Ok(Outcome::None)
            }
            Command::DeleteRow(at) => {
                self.delete_row(at)?;
                Ok(Outcome::None)
            }
            Command::DeleteColumn(at) => {
                self.delete_column(at)?;
                Ok(Outcome::None)
            }
            Command::Dedupe => {
                let removed = self.dedupe_rows();
                Ok(Outcome::Text(format!("Removed {} duplicate row(s)", removed)))
            }
            Command::Replace { find, replace } => {
                let changed = self.find_and_replace(&find, &replace);
                Ok(Outcome::Text(format!("Replaced in {} cell(s)", changed)))
            }
            Command::Format { format, address } => {
                self.apply_format(&address, format)?;
                Ok(Outcome::None)
            }
            Command::Show => Ok(Outcome::Text(self.render_table())),
            Command::Goto(address) => {
                if self.grid.cell_at(&address).is_none() {
                    return Err(GridError::NotFound(address.to_string()).into());
                }
                Ok(Outcome::Goto(address))
            }
            Command::Quit => Ok(Outcome::Quit),
        }
    }

    /// Parse and run one command line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let command = Command::parse(line)?;
        self.run(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellpad_engine::EvalError;

    #[test]
    fn test_parse_set() {
        assert_eq!(
            Command::parse("set A1 hello world").unwrap(),
            Command::Set {
                address: "A1".to_string(),
                text: "hello world".to_string()
            }
        );
        assert_eq!(
            Command::parse(":set B2 \"  padded \"").unwrap(),
            Command::Set {
                address: "B2".to_string(),
                text: "  padded ".to_string()
            }
        );
        assert_eq!(
            Command::parse("set C3").unwrap(),
            Command::Set {
                address: "C3".to_string(),
                text: String::new()
            }
        );
        assert!(Command::parse("set").is_err());
    }

    #[test]
    fn test_parse_formula_forms() {
        assert_eq!(
            Command::parse("=SUM(A1:A2)").unwrap(),
            Command::Evaluate("=SUM(A1:A2)".to_string())
        );
        assert_eq!(
            Command::parse("fx =max(A1:B1)").unwrap(),
            Command::Evaluate("=max(A1:B1)".to_string())
        );
        assert!(Command::parse("fx").is_err());
    }

    #[test]
    fn test_parse_structure_commands() {
        assert_eq!(Command::parse("addrow").unwrap(), Command::AddRow);
        assert_eq!(Command::parse("addcol").unwrap(), Command::AddColumn);
        assert_eq!(Command::parse("insrow 3").unwrap(), Command::InsertRow(3));
        assert_eq!(Command::parse("inscol c").unwrap(), Command::InsertColumn(3));
        assert_eq!(Command::parse("delcol 2").unwrap(), Command::DeleteColumn(2));
        assert_eq!(Command::parse("delrow 1").unwrap(), Command::DeleteRow(1));
        assert_eq!(
            Command::parse("insrow x"),
            Err(CellpadError::Usage("insrow N"))
        );
        assert!(Command::parse("addrow 2").is_err());
    }

    #[test]
    fn test_parse_replace_with_quotes() {
        assert_eq!(
            Command::parse("replace cat dog").unwrap(),
            Command::Replace {
                find: "cat".to_string(),
                replace: "dog".to_string()
            }
        );
        assert_eq!(
            Command::parse(r#"replace "a \"b\"" """#).unwrap(),
            Command::Replace {
                find: "a \"b\"".to_string(),
                replace: String::new()
            }
        );
        assert!(Command::parse("replace cat").is_err());
        assert!(Command::parse("replace \"cat dog").is_err());
    }

    #[test]
    fn test_parse_format_and_goto() {
        assert_eq!(
            Command::parse("italic B2").unwrap(),
            Command::Format {
                format: Format::Italic,
                address: "B2".to_string()
            }
        );
        assert!(Command::parse("bold").is_err());
        assert_eq!(
            Command::parse("goto C4").unwrap(),
            Command::Goto(Address::new(3, 4))
        );
        assert!(Command::parse("goto c4").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            Command::parse("explode now"),
            Err(CellpadError::UnknownCommand("explode now".to_string()))
        );
    }

    #[test]
    fn test_execute_session() {
        let mut doc = Document::new(3, 2).unwrap();
        doc.execute("set A1 cat cat").unwrap();
        doc.execute("set A2 cat cat").unwrap();
        assert_eq!(
            doc.execute("dedupe").unwrap(),
            Outcome::Text("Removed 1 duplicate row(s)".to_string())
        );
        assert_eq!(
            doc.execute("replace cat dog").unwrap(),
            Outcome::Text("Replaced in 1 cell(s)".to_string())
        );
        assert_eq!(doc.text("A1").unwrap(), "dog cat");
        doc.execute("set B1 2").unwrap();
        doc.execute("set A2 4").unwrap();
        assert_eq!(
            doc.execute("=AVG(B1:A2)").unwrap(),
            Outcome::Text("3".to_string())
        );
        assert_eq!(doc.execute("q").unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_execute_reports_errors() {
        let mut doc = Document::new(2, 2).unwrap();
        assert_eq!(
            doc.execute("=MAX(B1:A1)"),
            Err(CellpadError::Eval(EvalError::EmptyRange))
        );
        assert_eq!(
            doc.execute("goto Z9"),
            Err(CellpadError::Grid(GridError::NotFound("Z9".to_string())))
        );
        assert!(doc.execute("delrow 9").is_err());
    }

    #[test]
    fn test_execute_structure_then_show() {
        let mut doc = Document::new(1, 1).unwrap();
        doc.execute("set A1 v").unwrap();
        doc.execute("addcol").unwrap();
        doc.execute("insrow 1").unwrap();
        assert_eq!(
            doc.execute("show").unwrap(),
            Outcome::Text("\tA\tB\n1\t\t\n2\tv\t".to_string())
        );
    }
}
