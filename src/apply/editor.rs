//! Editing a proposal message in the operator's editor.

use std::io::Write;
use std::process::Command;

use dialoguer::Input;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::apply::interrupt::Interrupt;
use crate::apply::operator::prompt_error;
use crate::error::{EditError, OperatorError};

/// Signal number of SIGINT on every supported Unix.
#[cfg(unix)]
const SIGINT: i32 = 2;

/// Lets the operator rewrite a commit message.
#[cfg_attr(test, mockall::automock)]
pub trait MessageEditor {
    /// Return the operator's replacement for `message`.
    fn edit(&self, message: &str) -> Result<String, EditError>;
}

/// Editor that opens a temporary file in an external program.
///
/// The buffer lives only for the duration of one [`MessageEditor::edit`]
/// call and is deleted when it returns, whether the edit succeeded, failed,
/// or was interrupted. The editor child is always waited for.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
    wait_for_confirmation: bool,
    interrupt: Interrupt,
}

impl ExternalEditor {
    /// `command` is split shell-style, so `code --wait` works.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            wait_for_confirmation: true,
            interrupt: Interrupt::default(),
        }
    }

    /// Flag checked once the editor exits; when raised the edit is discarded.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Whether to ask the operator to press enter once done.
    ///
    /// GUI editors often return immediately, so this defaults to `true`.
    pub fn wait_for_confirmation(mut self, wait: bool) -> Self {
        self.wait_for_confirmation = wait;
        self
    }

    fn program_and_args(&self) -> Result<(String, Vec<String>), EditError> {
        let mut words = shell_words::split(&self.command)
            .map_err(|_| EditError::InvalidEditorCommand(self.command.clone()))?;
        if words.is_empty() {
            return Err(EditError::NoEditor);
        }
        let program = words.remove(0);
        Ok((program, words))
    }
}

impl MessageEditor for ExternalEditor {
    fn edit(&self, message: &str) -> Result<String, EditError> {
        let (program, args) = self.program_and_args()?;

        let mut buffer = tempfile::Builder::new()
            .prefix("COMMIT_EDITMSG-")
            .suffix(".txt")
            .tempfile()
            .map_err(EditError::Buffer)?;
        buffer
            .write_all(message.as_bytes())
            .and_then(|()| buffer.flush())
            .map_err(EditError::Buffer)?;

        debug!("Opening {} in {}", buffer.path().display(), self.command);

        let status = Command::new(&program)
            .args(&args)
            .arg(buffer.path())
            .status()
            .map_err(|source| EditError::SpawnFailed {
                editor: program.clone(),
                source,
            })?;

        if self.interrupt.is_raised() || killed_by_sigint(&status) {
            debug!("Edit interrupted, discarding {}", buffer.path().display());
            return Err(EditError::Interrupted);
        }

        if !status.success() {
            return Err(EditError::EditorFailed {
                editor: program,
                code: status.code().unwrap_or(-1),
            });
        }

        if self.wait_for_confirmation {
            Input::<String>::new()
                .with_prompt("When you are done, press enter to continue")
                .allow_empty(true)
                .interact_text()
                .map_err(|e| match prompt_error(e) {
                    OperatorError::Interrupted => EditError::Interrupted,
                    _ => EditError::Aborted,
                })?;
        }

        read_back(&buffer)
    }
}

#[cfg(unix)]
fn killed_by_sigint(status: &std::process::ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_sigint(_status: &std::process::ExitStatus) -> bool {
    false
}

/// Read the buffer by path; editors may replace the file instead of writing in place.
fn read_back(buffer: &NamedTempFile) -> Result<String, EditError> {
    let content = std::fs::read_to_string(buffer.path()).map_err(EditError::Buffer)?;
    Ok(content.trim_end().to_string())
}
