//! Interactive application of a commit plan.

pub mod editor;
pub mod engine;
pub mod interrupt;
pub mod operator;

pub use editor::{ExternalEditor, MessageEditor};
pub use engine::{ApplyEngine, Command};
pub use interrupt::Interrupt;
pub use operator::{Notice, Operator, TerminalOperator, render_table};
