//! Error type for shader documentation filtering

use std::path::PathBuf;

/// Errors produced while turning a shader file into a documentation unit
#[derive(Debug, thiserror::Error)]
pub enum ShaderDocError {
    /// The input path has no extension to resolve a stage from
    #[error("{0} has no file extension, cannot determine shader stage")]
    MissingExtension(PathBuf),

    /// The extension is not registered in the stage table
    #[error("unknown shader extension '.{extension}' for {}", path.display())]
    UnknownExtension { extension: String, path: PathBuf },

    /// Reading the shader or configuration file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An `#include` directive without a quoted shared-source name
    #[error("malformed include directive on line {line}: {text}")]
    MalformedInclude { line: usize, text: String },

    /// The configuration file is not valid TOML for this tool
    #[error("failed to parse configuration: {0}")]
    Config(String),

    /// Writing the documentation text failed
    #[error("failed to render documentation: {0}")]
    Render(#[from] std::fmt::Error),

    /// The configuration parsed but describes an unusable setup
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<toml::de::Error> for ShaderDocError {
    fn from(e: toml::de::Error) -> Self {
        ShaderDocError::Config(e.to_string())
    }
}
