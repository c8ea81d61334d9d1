use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for doxygen loading
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(dub::doxygen::io),
        help("generate the XML first: set GENERATE_XML = YES in your Doxyfile and run doxygen")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid XML in '{path}'")]
    #[diagnostic(code(dub::doxygen::xml))]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("no {kind} compound named '{name}' in the doxygen index")]
    #[diagnostic(
        code(dub::doxygen::missing_compound),
        help("check the namespace name, or run 'dub list' to see what was found")
    )]
    MissingCompound { kind: String, name: String },
}
