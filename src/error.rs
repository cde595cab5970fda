use thiserror::Error;

/// Message surfaced when a failed run carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to generate simulation. Check your API key or network connection.";

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("unknown animal '{0}' (run `biovision animals` to list them)")]
    UnknownAnimal(String),

    #[error("unknown {kind} model '{id}'")]
    UnknownModel { kind: &'static str, id: String },
}

#[derive(Error, Debug)]
pub enum Error {
    /// Caller input rejected before any remote call was made.
    #[error("{0}")]
    Validation(String),

    /// Missing or rejected credential.
    #[error("{0}")]
    Auth(String),

    #[error("No response from Gemini")]
    EmptyResponse,

    #[error("Malformed response from Gemini: {0}")]
    MalformedResponse(String),

    #[error("No image data found in response")]
    NoImageData,

    /// Non-success HTTP status carrying the service's own message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The run was replaced by a newer one before it settled.
    #[error("simulation superseded by a newer request")]
    Superseded,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Message shown to the user when this error ends a run.
    ///
    /// Prefers the message embedded in the error and falls back to
    /// [`GENERIC_FAILURE_MESSAGE`] when there is none.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// True when the failure points at the credential.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
