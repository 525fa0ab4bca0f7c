use std::io::{self, Write};

use crate::error::ShellError;
use crate::process::signal::SignalCoordinator;

/// Longest line the reader keeps; further bytes are dropped until newline.
pub const MAX_LINE: usize = 2048;
/// Arguments past this count are dropped.
pub const MAX_ARGS: usize = 512;

const PROMPT: &str = ": ";

/// One fully tokenized input line, consumed within a single loop pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub args: Vec<String>,
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub background: bool,
}

impl ParsedCommand {
    pub fn name(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn is_comment(&self) -> bool {
        self.name().map(|n| n.starts_with('#')).unwrap_or(false)
    }
}

#[derive(Debug)]
pub enum ReadOutcome {
    Line(ParsedCommand),
    /// The stop signal arrived mid-read; the partial buffer was discarded.
    Interrupted,
    Eof,
}

pub struct LineReader {
    pid_text: String,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    pub fn new() -> Self {
        Self {
            pid_text: std::process::id().to_string(),
        }
    }

    /// Prompts and reads one line, byte by byte, from standard input.
    ///
    /// The read goes through `libc::read` rather than the buffered stdin
    /// handle: the stop-signal handler is installed without `SA_RESTART`,
    /// so a signal landing in a blocked read surfaces here as `EINTR` and
    /// the half-typed line can be thrown away instead of parsed.
    pub fn read_command(&self, signals: &SignalCoordinator) -> Result<ReadOutcome, ShellError> {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let mut raw: Vec<u8> = Vec::new();
        loop {
            if signals.take_read_interrupted() {
                return Ok(ReadOutcome::Interrupted);
            }

            let mut byte = 0u8;
            let n = unsafe {
                libc::read(
                    libc::STDIN_FILENO,
                    &mut byte as *mut u8 as *mut libc::c_void,
                    1,
                )
            };
            if n < 0 {
                let err = io::Error::last_os_error();
                if err.raw_os_error() == Some(libc::EINTR) {
                    if signals.take_read_interrupted() {
                        return Ok(ReadOutcome::Interrupted);
                    }
                    continue;
                }
                return Err(ShellError::Io(err));
            }
            if n == 0 {
                if raw.is_empty() {
                    return Ok(ReadOutcome::Eof);
                }
                break;
            }
            if byte == b'\n' {
                break;
            }
            if raw.len() < MAX_LINE {
                raw.push(byte);
            }
        }

        let line = String::from_utf8_lossy(&raw);
        let expanded = expand_pid(&line, &self.pid_text);
        Ok(ReadOutcome::Line(parse_line(&expanded)))
    }
}

/// Replaces every `$$` with the interpreter's own pid. A `$` that is not
/// followed by another `$` (including one at the very end of the line) is
/// kept as-is.
fn expand_pid(line: &str, pid: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'$') {
            chars.next();
            out.push_str(pid);
        } else {
            out.push(c);
        }
    }
    out
}

/// Splits an expanded line on spaces and peels off redirection targets and
/// the trailing background marker.
fn parse_line(line: &str) -> ParsedCommand {
    let mut cmd = ParsedCommand::default();
    let mut tokens = line.split(' ').filter(|t| !t.is_empty());

    while let Some(token) = tokens.next() {
        match token {
            "<" => {
                if let Some(path) = tokens.next() {
                    cmd.input_path = Some(path.to_string());
                }
            }
            ">" => {
                if let Some(path) = tokens.next() {
                    cmd.output_path = Some(path.to_string());
                }
            }
            _ => {
                if cmd.args.len() < MAX_ARGS {
                    cmd.args.push(token.to_string());
                }
            }
        }
    }

    // Only a trailing & requests background execution; anywhere else it is
    // an ordinary argument.
    if cmd.args.last().map(|a| a == "&").unwrap_or(false) {
        cmd.background = true;
        cmd.args.pop();
    }

    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_pid_replaces_every_pair() {
        assert_eq!(expand_pid("echo $$", "1234"), "echo 1234");
        assert_eq!(expand_pid("$$ and $$", "7"), "7 and 7");
        assert_eq!(expand_pid("a$$b", "99"), "a99b");
    }

    #[test]
    fn test_expand_pid_keeps_lone_dollar() {
        assert_eq!(expand_pid("price is 5$", "1234"), "price is 5$");
        assert_eq!(expand_pid("$", "1234"), "$");
        assert_eq!(expand_pid("$a$", "1234"), "$a$");
    }

    #[test]
    fn test_expand_pid_odd_run_of_dollars() {
        // Pairs collapse left to right; the odd one out survives.
        assert_eq!(expand_pid("$$$", "42"), "42$");
        assert_eq!(expand_pid("$$$$", "42"), "4242");
    }

    #[test]
    fn test_parse_plain_command() {
        let cmd = parse_line("ls -la /tmp");
        assert_eq!(cmd.args, vec!["ls", "-la", "/tmp"]);
        assert_eq!(cmd.input_path, None);
        assert_eq!(cmd.output_path, None);
        assert!(!cmd.background);
    }

    #[test]
    fn test_parse_empty_line() {
        let cmd = parse_line("");
        assert!(cmd.is_empty());
        assert!(!cmd.is_comment());
    }

    #[test]
    fn test_parse_comment_line() {
        let cmd = parse_line("# this is a comment");
        assert!(cmd.is_comment());
    }

    #[test]
    fn test_parse_redirections_consume_tokens() {
        let cmd = parse_line("sort < in.txt > out.txt");
        assert_eq!(cmd.args, vec!["sort"]);
        assert_eq!(cmd.input_path.as_deref(), Some("in.txt"));
        assert_eq!(cmd.output_path.as_deref(), Some("out.txt"));
    }

    #[test]
    fn test_parse_repeated_redirection_last_wins() {
        let cmd = parse_line("cat < a < b > x > y");
        assert_eq!(cmd.args, vec!["cat"]);
        assert_eq!(cmd.input_path.as_deref(), Some("b"));
        assert_eq!(cmd.output_path.as_deref(), Some("y"));
    }

    #[test]
    fn test_parse_dangling_redirection_keeps_no_path() {
        let cmd = parse_line("cat <");
        assert_eq!(cmd.args, vec!["cat"]);
        assert_eq!(cmd.input_path, None);
    }

    #[test]
    fn test_parse_trailing_ampersand_sets_background() {
        let cmd = parse_line("sleep 5 &");
        assert_eq!(cmd.args, vec!["sleep", "5"]);
        assert!(cmd.background);
    }

    #[test]
    fn test_parse_ampersand_in_the_middle_is_an_argument() {
        let cmd = parse_line("echo & done");
        assert_eq!(cmd.args, vec!["echo", "&", "done"]);
        assert!(!cmd.background);
    }

    #[test]
    fn test_parse_skips_repeated_spaces() {
        let cmd = parse_line("echo   hello    world");
        assert_eq!(cmd.args, vec!["echo", "hello", "world"]);
    }

    #[test]
    fn test_parse_caps_argument_count() {
        let line = vec!["x"; MAX_ARGS + 40].join(" ");
        let cmd = parse_line(&line);
        assert_eq!(cmd.args.len(), MAX_ARGS);
    }

    #[test]
    fn test_expansion_then_parse() {
        let expanded = expand_pid("echo $$ > trace_$$.log", "321");
        let cmd = parse_line(&expanded);
        assert_eq!(cmd.args, vec!["echo", "321"]);
        assert_eq!(cmd.output_path.as_deref(), Some("trace_321.log"));
    }
}
