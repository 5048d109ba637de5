use miette::Diagnostic;
use thiserror::Error;

/// Broad failure category, used by callers that react to the kind of
/// failure rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input: colour strings, images, templates, arguments.
    Validation,
    /// A merge exceeded the source span or directive chain limit.
    Capacity,
    /// Mutually exclusive options were requested together.
    Policy,
    /// The file system failed underneath us.
    Io,
}

/// Main error type for drawables operations
#[derive(Error, Diagnostic, Debug)]
pub enum DrawError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(drawables::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid colour '{value}'")]
    #[diagnostic(
        code(drawables::colour),
        help("Use hexadecimal RRGGBB or RRGGBBAA, for example ff00ff or ff00ff80")
    )]
    InvalidColour { value: String },

    #[error("Could not load image {path}: {message}")]
    #[diagnostic(code(drawables::image))]
    InvalidImage {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Template '{name}' is not valid JSON: {message}")]
    #[diagnostic(code(drawables::template))]
    Template {
        name: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Illegal argument: {message}")]
    #[diagnostic(code(drawables::argument))]
    Argument {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(drawables::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Hand position ({x}, {y}) moves directives out of range")]
    #[diagnostic(
        code(drawables::hand),
        help("Offsets are 32-bit half-pixel units; use a hand position closer to the image")
    )]
    HandOffset { x: i32, y: i32 },

    #[error("The {what} ({size}) exceeds the limit of {limit}")]
    #[diagnostic(code(drawables::capacity))]
    Capacity {
        what: &'static str,
        size: usize,
        limit: usize,
        #[help]
        help: Option<String>,
    },

    #[error("Unsupported option combination: {message}")]
    #[diagnostic(code(drawables::policy))]
    Policy {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl DrawError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DrawError::Io { .. } => ErrorKind::Io,
            DrawError::InvalidColour { .. }
            | DrawError::InvalidImage { .. }
            | DrawError::Template { .. }
            | DrawError::Argument { .. }
            | DrawError::Config { .. }
            | DrawError::HandOffset { .. } => ErrorKind::Validation,
            DrawError::Capacity { .. } => ErrorKind::Capacity,
            DrawError::Policy { .. } => ErrorKind::Policy,
        }
    }

    pub(crate) fn argument(message: impl Into<String>) -> Self {
        DrawError::Argument {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;
