use crate::span::Span;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LowerError {
    /// The IR broke a contract the front end guarantees (wrong position, bad entity kind).
    #[error("Internal error: {msg}")]
    Internal { msg: String, span: Option<Span> },

    /// The IR uses a construct this stage cannot lower yet.
    #[error("Unsupported construct: {msg}")]
    Unsupported { msg: String, span: Option<Span> },

    #[error("Unresolved reference: cannot resolve '{name}'")]
    Unresolved { name: String, span: Option<Span> },

    #[error("Config error: {msg}")]
    Config { msg: String, path: PathBuf },

    #[error("Input error: {msg}")]
    Input { msg: String },
}

impl LowerError {
    pub fn internal(msg: impl Into<String>, span: Option<Span>) -> Self {
        Self::Internal { msg: msg.into(), span }
    }

    pub fn unsupported(msg: impl Into<String>, span: Option<Span>) -> Self {
        Self::Unsupported { msg: msg.into(), span }
    }

    pub fn unresolved(name: impl Into<String>, span: Option<Span>) -> Self {
        Self::Unresolved { name: name.into(), span }
    }

    pub fn config(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Config { msg: msg.into(), path }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input { msg: msg.into() }
    }

    /// Short tag used in plain-text reports.
    pub fn kind(&self) -> &'static str {
        match self {
            LowerError::Internal { .. } => "internal",
            LowerError::Unsupported { .. } => "unsupported",
            LowerError::Unresolved { .. } => "unresolved",
            LowerError::Config { .. } => "config",
            LowerError::Input { .. } => "input",
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            LowerError::Internal { span, .. }
            | LowerError::Unsupported { span, .. }
            | LowerError::Unresolved { span, .. } => *span,
            LowerError::Config { .. } | LowerError::Input { .. } => None,
        }
    }
}

/// Render a LowerError with ariadne when the source text is known, plain text otherwise.
pub fn render_error(source: Option<&str>, filename: &str, err: &LowerError) {
    use ariadne::{Label, Report, ReportKind, Source};

    match (source, err.span()) {
        (Some(source), Some(span)) => {
            let rendered = Report::build(ReportKind::Error, (), span.start)
                .with_message(format!("{} error in {filename}", err.kind()))
                .with_label(Label::new(span.start..span.end).with_message(err.to_string()))
                .finish()
                .eprint(Source::from(source));
            if rendered.is_err() {
                eprintln!("error[{}]: {filename}: {err}", err.kind());
            }
        }
        _ => match err {
            LowerError::Config { path, .. } => {
                eprintln!("error[config]: {err}");
                eprintln!("  --> {}", path.display());
            }
            _ => {
                eprintln!("error[{}]: {filename}: {err}", err.kind());
                if let Some(span) = err.span() {
                    eprintln!("  --> {filename}@{}..{}", span.start, span.end);
                }
            }
        },
    }
}
