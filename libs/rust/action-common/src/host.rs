//! Runner command sink.
//!
//! [`ActionHost`] is the capability the action uses to talk to the CI runner:
//! log lines, secret masking, and publishing values for later steps.
//! [`GithubActionsHost`] implements it with the GitHub Actions workflow-command
//! and file-command protocols.

use crate::error::{ActionError, ActionResult};
use parking_lot::Mutex;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Env var naming the file that collects exported variables.
pub const GITHUB_ENV: &str = "GITHUB_ENV";
/// Env var naming the file that collects step outputs.
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Logging and publication primitives provided by the runner.
pub trait ActionHost: Send + Sync {
    /// Emit an error annotation.
    fn error(&self, message: &str);

    /// Emit a plain informational line.
    fn info(&self, message: &str);

    /// Register a value to be redacted from all later log output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be written.
    fn set_secret(&self, value: &str) -> ActionResult<()>;

    /// Export an environment variable to subsequent steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the runner file cannot be written.
    fn export_variable(&self, name: &str, value: &str) -> ActionResult<()>;

    /// Publish a named step output.
    ///
    /// # Errors
    ///
    /// Returns an error if the runner file cannot be written.
    fn set_output(&self, name: &str, value: &str) -> ActionResult<()>;

    /// Report a terminal failure for the step.
    fn set_failed(&self, message: &str) {
        self.error(message);
    }
}

/// A `::command key=value,...::data` workflow command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCommand<'a> {
    name: &'a str,
    properties: Vec<(&'a str, &'a str)>,
    message: &'a str,
}

impl<'a> WorkflowCommand<'a> {
    /// Create a command with no properties.
    #[must_use]
    pub const fn new(name: &'a str, message: &'a str) -> Self {
        Self {
            name,
            properties: Vec::new(),
            message,
        }
    }

    /// Attach a property.
    #[must_use]
    pub fn with_property(mut self, key: &'a str, value: &'a str) -> Self {
        self.properties.push((key, value));
        self
    }
}

impl std::fmt::Display for WorkflowCommand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "::{}", self.name)?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            let sep = if i == 0 { " " } else { "," };
            write!(f, "{sep}{key}={}", escape_property(value))?;
        }
        write!(f, "::{}", escape_data(self.message))
    }
}

/// Escape command data.
#[must_use]
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// Escape a command property value.
#[must_use]
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

/// Format a heredoc-style file command record using `delimiter`.
///
/// # Errors
///
/// Returns [`ActionError::Command`] if the name or value contains the delimiter.
pub fn file_command_record(name: &str, value: &str, delimiter: &str) -> ActionResult<String> {
    if name.contains(delimiter) {
        return Err(ActionError::Command(format!(
            "Name should not contain the delimiter \"{delimiter}\""
        )));
    }
    if value.contains(delimiter) {
        return Err(ActionError::Command(format!(
            "Value should not contain the delimiter \"{delimiter}\""
        )));
    }

    let mut record = String::new();
    let _ = writeln!(record, "{name}<<{delimiter}");
    let _ = writeln!(record, "{value}");
    let _ = writeln!(record, "{delimiter}");
    Ok(record)
}

/// [`ActionHost`] speaking the GitHub Actions runner protocols.
pub struct GithubActionsHost {
    out: Mutex<Box<dyn Write + Send>>,
    env_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

impl std::fmt::Debug for GithubActionsHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubActionsHost")
            .field("env_file", &self.env_file)
            .field("output_file", &self.output_file)
            .finish_non_exhaustive()
    }
}

impl GithubActionsHost {
    /// Create a host writing commands to `out`.
    #[must_use]
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            env_file: None,
            output_file: None,
        }
    }

    /// Create a host writing to stdout, with file commands taken from the
    /// runner environment.
    #[must_use]
    pub fn from_env() -> Self {
        let file_from_env = |key: &str| {
            std::env::var_os(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        let mut host = Self::new(Box::new(std::io::stdout()));
        host.env_file = file_from_env(GITHUB_ENV);
        host.output_file = file_from_env(GITHUB_OUTPUT);
        host
    }

    /// Append exported variables to `path`.
    #[must_use]
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Append step outputs to `path`.
    #[must_use]
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "{line}")?;
        out.flush()
    }

    fn issue(&self, command: &WorkflowCommand<'_>) -> ActionResult<()> {
        self.write_line(&command.to_string())?;
        Ok(())
    }

    fn issue_file_command(path: &Path, name: &str, value: &str) -> ActionResult<()> {
        let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
        let record = file_command_record(name, value, &delimiter)?;

        let mut file = OpenOptions::new().append(true).create(true).open(path)?;
        file.write_all(record.as_bytes())?;
        debug!(path = %path.display(), name, "Appended file command");
        Ok(())
    }
}

impl ActionHost for GithubActionsHost {
    fn error(&self, message: &str) {
        let _ = self.issue(&WorkflowCommand::new("error", message));
    }

    fn info(&self, message: &str) {
        let _ = self.write_line(message);
    }

    fn set_secret(&self, value: &str) -> ActionResult<()> {
        self.issue(&WorkflowCommand::new("add-mask", value))
    }

    fn export_variable(&self, name: &str, value: &str) -> ActionResult<()> {
        match &self.env_file {
            Some(path) => Self::issue_file_command(path, name, value),
            None => self.issue(&WorkflowCommand::new("set-env", value).with_property("name", name)),
        }
    }

    fn set_output(&self, name: &str, value: &str) -> ActionResult<()> {
        match &self.output_file {
            Some(path) => Self::issue_file_command(path, name, value),
            None => {
                self.write_line("")?;
                self.issue(&WorkflowCommand::new("set-output", value).with_property("name", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Shared in-memory writer so tests can inspect stdout.
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    fn host() -> (GithubActionsHost, Buffer) {
        let buf = Buffer::default();
        (GithubActionsHost::new(Box::new(buf.clone())), buf)
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_data("50%\r\nx"), "50%25%0D%0Ax");
        assert_eq!(escape_property("a:b,c%"), "a%3Ab%2Cc%25");
    }

    #[test]
    fn test_command_format() {
        let cmd = WorkflowCommand::new("set-output", "v:1")
            .with_property("name", "access-token")
            .with_property("extra", "a,b");
        assert_eq!(cmd.to_string(), "::set-output name=access-token,extra=a%2Cb::v:1");
        assert_eq!(WorkflowCommand::new("error", "boom").to_string(), "::error::boom");
    }

    #[test]
    fn test_info_and_error() {
        let (host, buf) = host();
        host.info("hello");
        host.error("line1\nline2");
        assert_eq!(buf.contents(), "hello\n::error::line1%0Aline2\n");
    }

    #[test]
    fn test_set_secret() {
        let (host, buf) = host();
        host.set_secret("s3cr3t").unwrap();
        assert_eq!(buf.contents(), "::add-mask::s3cr3t\n");
    }

    #[test]
    fn test_legacy_commands_without_files() {
        let (host, buf) = host();
        host.export_variable("INFISICAL_TOKEN", "tok").unwrap();
        host.set_output("access-token", "tok").unwrap();
        assert_eq!(
            buf.contents(),
            "::set-env name=INFISICAL_TOKEN::tok\n\n::set-output name=access-token::tok\n"
        );
    }

    #[test]
    fn test_file_record() {
        let record = file_command_record("NAME", "value", "EOF").unwrap();
        assert_eq!(record, "NAME<<EOF\nvalue\nEOF\n");
        assert!(file_command_record("NAME", "has EOF inside", "EOF").is_err());
        assert!(file_command_record("EOF", "value", "EOF").is_err());
    }
}
