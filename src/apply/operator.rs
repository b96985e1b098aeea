//! Operator I/O: rendering the plan and reading commands.

use std::io;

use dialoguer::Input;
use tracing::{debug, error, warn};

use crate::error::OperatorError;
use crate::plan::{CommitPlan, OutcomeTally};

/// Something the operator should be told between prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Confirmation input was not one of y/n/e.
    UnknownCommand(String),
    /// Selection input was not a valid position in the current plan.
    InvalidSelection(String),
    Committed { message: String },
    CommitFailed { detail: String },
    EditFailed { detail: String },
}

/// The interactive side of the apply loop.
#[cfg_attr(test, mockall::automock)]
pub trait Operator {
    fn render_plan(&mut self, plan: &CommitPlan, multiline: bool);

    /// Read the raw proposal selection.
    fn read_selection(&mut self) -> Result<String, OperatorError>;

    /// Read the raw accept/reject/edit command.
    fn read_confirmation(&mut self) -> Result<String, OperatorError>;

    fn notify(&mut self, notice: Notice);

    fn report(&mut self, tally: &OutcomeTally);
}

/// Operator on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalOperator;

impl TerminalOperator {
    pub fn new() -> Self {
        Self
    }

    fn prompt(&self, text: &str) -> Result<String, OperatorError> {
        Input::<String>::new()
            .with_prompt(text)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }
}

/// Classify a failed prompt.
///
/// Ctrl-C at a prompt (read as `Interrupted` while the terminal is in raw
/// mode) and end of input end the session cleanly; anything else, such as
/// stdin not being a terminal, is a real failure.
pub(crate) fn prompt_error(err: dialoguer::Error) -> OperatorError {
    match &err {
        dialoguer::Error::IO(e)
            if matches!(
                e.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof
            ) =>
        {
            debug!("Prompt interrupted: {e}");
            OperatorError::Interrupted
        }
        _ => OperatorError::Terminal(err.to_string()),
    }
}

impl Operator for TerminalOperator {
    fn render_plan(&mut self, plan: &CommitPlan, multiline: bool) {
        println!("{}", render_table(plan, multiline));
    }

    fn read_selection(&mut self) -> Result<String, OperatorError> {
        self.prompt("Select commit")
    }

    fn read_confirmation(&mut self) -> Result<String, OperatorError> {
        self.prompt("Confirm? [(y)es/(n)o/(e)dit]")
    }

    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::UnknownCommand(input) => {
                debug!("Unknown command: {input:?}");
                println!("Unknown command");
            }
            Notice::InvalidSelection(detail) => warn!("{detail}"),
            Notice::Committed { message } => println!("✓ Committed: {message}"),
            Notice::CommitFailed { detail } => error!("{detail}"),
            Notice::EditFailed { detail } => error!("{detail}"),
        }
    }

    fn report(&mut self, tally: &OutcomeTally) {
        println!("{tally}");
    }
}

/// Render the plan as a table with `#`, `Message`, and `Files` columns.
///
/// Messages are shown display-normalized (first line only unless
/// `multiline`); files are listed one per line.
pub fn render_table(plan: &CommitPlan, multiline: bool) -> String {
    let header = vec![
        vec!["#".to_string()],
        vec!["Message".to_string()],
        vec!["Files".to_string()],
    ];

    let rows: Vec<Vec<Vec<String>>> = plan
        .iter()
        .enumerate()
        .map(|(idx, proposal)| {
            vec![
                vec![idx.to_string()],
                cell_lines(proposal.display_message(multiline)),
                if proposal.files.is_empty() {
                    vec![String::new()]
                } else {
                    proposal.files.clone()
                },
            ]
        })
        .collect();

    let mut widths = [0usize; 3];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (col, lines) in row.iter().enumerate() {
            for line in lines {
                widths[col] = widths[col].max(line.chars().count());
            }
        }
    }

    let border = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(mid))
    };

    let mut out = Vec::new();
    let total_width = widths.iter().sum::<usize>() + widths.len() * 3 + 1;
    out.push(format!("{:^total_width$}", "Commits"));
    out.push(border("┌", "┬", "┐"));
    push_row(&mut out, &header, &widths);
    out.push(border("├", "┼", "┤"));
    for (idx, row) in rows.iter().enumerate() {
        if idx > 0 {
            out.push(border("├", "┼", "┤"));
        }
        push_row(&mut out, row, &widths);
    }
    out.push(border("└", "┴", "┘"));

    out.join("\n")
}

fn cell_lines(text: &str) -> Vec<String> {
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

fn push_row(out: &mut Vec<String>, row: &[Vec<String>], widths: &[usize; 3]) {
    let height = row.iter().map(Vec::len).max().unwrap_or(1);
    for line_idx in 0..height {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(lines, width)| {
                let text = lines.get(line_idx).map(String::as_str).unwrap_or("");
                let pad = width - text.chars().count();
                format!(" {text}{} ", " ".repeat(pad))
            })
            .collect();
        out.push(format!("│{}│", cells.join("│")));
    }
}
