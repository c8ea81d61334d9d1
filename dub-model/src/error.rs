use miette::Diagnostic;
use thiserror::Error;

/// Result type for entity model operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("'{name}' has no location metadata")]
    #[diagnostic(
        code(dub::missing_location),
        help("make sure doxygen was run with XML output and source browsing enabled")
    )]
    MissingLocation { name: String },

    #[error("no generator bound for '{name}'")]
    #[diagnostic(
        code(dub::unbound_generator),
        help("bind a generator to the declaration, its class or its namespace before rendering")
    )]
    UnboundGenerator { name: String },

    #[error("'{name}' is missing a <{tag}> node")]
    #[diagnostic(code(dub::missing_node))]
    MissingNode { name: String, tag: String },

    #[error("failed to render '{name}' ({location}): {message}")]
    #[diagnostic(code(dub::render_error))]
    Render {
        name: String,
        location: String,
        message: String,
    },
}

impl Error {
    /// Name of the declaration the error is about.
    pub fn declaration(&self) -> &str {
        match self {
            Error::MissingLocation { name }
            | Error::UnboundGenerator { name }
            | Error::MissingNode { name, .. }
            | Error::Render { name, .. } => name,
        }
    }
}
