//! The interactive apply loop.
//!
//! Each round renders the plan, reads a proposal position, then reads one of
//! accept (`y`), reject (`n`), or edit (`e`):
//!
//! ```text
//! Presenting -> AwaitingSelection -> AwaitingConfirmation -> Presenting
//!      |
//!      +-- plan empty --> Done
//! ```
//!
//! Accepted and rejected proposals leave the plan. A proposal whose commit
//! fails also leaves the plan and is counted as an error; it is never retried
//! and never stops the remaining proposals from being processed. Bad input
//! re-renders without touching the plan or the tally.

use tracing::{debug, error, info};

use crate::apply::editor::MessageEditor;
use crate::apply::interrupt::Interrupt;
use crate::apply::operator::{Notice, Operator};
use crate::error::{EditError, OperatorError};
use crate::git::Committer;
use crate::plan::{CommitPlan, OutcomeTally};

/// Operator command for the selected proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Accept,
    Reject,
    Edit,
}

impl Command {
    /// Parse a confirmation answer; `None` for anything unrecognized.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(Command::Accept),
            "n" | "no" => Some(Command::Reject),
            "e" | "edit" => Some(Command::Edit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Presenting,
    AwaitingSelection,
    AwaitingConfirmation(usize),
    Done,
}

/// Drives one plan to completion against an operator, committer, and editor.
pub struct ApplyEngine<O, C, E> {
    plan: CommitPlan,
    tally: OutcomeTally,
    multiline: bool,
    operator: O,
    committer: C,
    editor: E,
    interrupt: Interrupt,
}

impl<O, C, E> ApplyEngine<O, C, E>
where
    O: Operator,
    C: Committer,
    E: MessageEditor,
{
    pub fn new(plan: CommitPlan, multiline: bool, operator: O, committer: C, editor: E) -> Self {
        Self {
            plan,
            tally: OutcomeTally::default(),
            multiline,
            operator,
            committer,
            editor,
            interrupt: Interrupt::default(),
        }
    }

    /// Flag checked before every step; when raised the loop stops with
    /// [`OperatorError::Interrupted`].
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn plan(&self) -> &CommitPlan {
        &self.plan
    }

    pub fn tally(&self) -> OutcomeTally {
        self.tally
    }

    pub fn operator(&self) -> &O {
        &self.operator
    }

    /// Run until the plan is empty, then report and return the tally.
    ///
    /// Only an interrupt or a broken terminal ends the loop early; every
    /// other failure is reported to the operator and the loop continues.
    pub fn run(&mut self) -> Result<OutcomeTally, OperatorError> {
        let mut state = State::Presenting;

        while state != State::Done {
            if self.interrupt.is_raised() {
                return Err(OperatorError::Interrupted);
            }
            state = self.step(state)?;
        }

        self.operator.report(&self.tally);
        info!("{}", self.tally);
        Ok(self.tally)
    }

    fn step(&mut self, state: State) -> Result<State, OperatorError> {
        let next = match state {
            State::Presenting => {
                if self.plan.is_empty() {
                    State::Done
                } else {
                    self.operator.render_plan(&self.plan, self.multiline);
                    State::AwaitingSelection
                }
            }
            State::AwaitingSelection => {
                let input = self.operator.read_selection()?;
                match self.validate_selection(&input) {
                    Ok(index) => State::AwaitingConfirmation(index),
                    Err(e) => {
                        self.operator.notify(Notice::InvalidSelection(e.to_string()));
                        State::Presenting
                    }
                }
            }
            State::AwaitingConfirmation(index) => {
                let input = self.operator.read_confirmation()?;
                match Command::parse(&input) {
                    Some(command) => self.apply(index, command)?,
                    None => self.operator.notify(Notice::UnknownCommand(input)),
                }
                State::Presenting
            }
            State::Done => State::Done,
        };
        Ok(next)
    }

    /// Check `input` names a position in the plan as it stands now.
    fn validate_selection(&self, input: &str) -> Result<usize, OperatorError> {
        let invalid = || OperatorError::InvalidSelection {
            input: input.trim().to_string(),
            max: self.plan.len().saturating_sub(1),
        };

        let index: usize = input.trim().parse().map_err(|_| invalid())?;
        if index < self.plan.len() {
            Ok(index)
        } else {
            Err(invalid())
        }
    }

    fn apply(&mut self, index: usize, command: Command) -> Result<(), OperatorError> {
        let Some(proposal) = self.plan.get(index) else {
            // Positions shift on removal; never act on a stale index
            let e = OperatorError::InvalidSelection {
                input: index.to_string(),
                max: self.plan.len().saturating_sub(1),
            };
            self.operator.notify(Notice::InvalidSelection(e.to_string()));
            return Ok(());
        };

        match command {
            Command::Accept => {
                let message = proposal.display_message(self.multiline).to_string();
                let files = proposal.files.clone();
                debug!("Committing {:?} with files {:?}", message, files);

                let result = self.committer.commit(&message, &files);
                self.plan.remove(index);

                match result {
                    Ok(()) => {
                        self.tally.record_committed();
                        let subject = message.lines().next().unwrap_or("").to_string();
                        self.operator.notify(Notice::Committed { message: subject });
                    }
                    Err(e) => {
                        self.tally.record_errored();
                        error!("Commit failed for {:?}: {}", message, e);
                        self.operator.notify(Notice::CommitFailed {
                            detail: e.to_string(),
                        });
                    }
                }
            }
            Command::Reject => {
                self.plan.remove(index);
                self.tally.record_skipped();
            }
            Command::Edit => {
                let current = proposal.message.clone();
                match self.editor.edit(&current) {
                    Ok(edited) => {
                        self.plan.replace_message(index, edited);
                    }
                    Err(EditError::Interrupted) => return Err(OperatorError::Interrupted),
                    Err(e) => self.operator.notify(Notice::EditFailed {
                        detail: e.to_string(),
                    }),
                }
            }
        }
        Ok(())
    }
}
