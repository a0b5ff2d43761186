use cursor::Line;

/// Pipeline stage a [`Diagnostic`] was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Phase {
    /// Lexing or parsing.
    Compilation,
    Runtime,
}

/// A fault reduced to what a user needs to see: where, which stage, and why.
///
/// Every stage error of the pipeline converts into this type, so the shell
/// only ever has to print one thing.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[line {line}] {phase} Error: {message}")]
pub struct Diagnostic {
    pub line: Line,
    pub phase: Phase,
    pub message: String,
}

impl Diagnostic {
    pub fn compilation(line: Line, message: impl Into<String>) -> Self {
        Self { line, phase: Phase::Compilation, message: message.into() }
    }

    pub fn runtime(line: Line, message: impl Into<String>) -> Self {
        Self { line, phase: Phase::Runtime, message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, Diagnostic>;
