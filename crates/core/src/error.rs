use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown static page key: '{0}'")]
    KeyNotFound(String),

    #[error("Malformed blog entry id '{id}': {reason}")]
    MalformedEntryId { id: String, reason: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Front matter error in {}: {message}", path.display())]
    FrontMatter { path: PathBuf, message: String },

    #[error("Compound rule references unknown variant axis '{axis}'")]
    UnknownVariantAxis { axis: String },

    #[error("Variant axis '{axis}' has no value '{value}'")]
    UnknownVariantValue { axis: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
