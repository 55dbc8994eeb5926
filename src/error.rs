//! Errors raised while talking to the API or validating user input.

/// Everything that can end a user action early.
///
/// Read failures are logged and leave stale data on screen, while write
/// failures and validation errors are shown to the user with a blocking alert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UiError {
    #[error("Erro ao conectar com o servidor: {0}")]
    Network(String),

    /// The server answered with a non-OK status.
    ///
    /// `message` is the server's `erro` field when present, otherwise a
    /// generic text.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),

    /// A required selection (type, subtype, account) was not made.
    #[error("{0}")]
    MissingSelection(&'static str),

    #[error("{0}")]
    Invalid(String),

    /// Some requests of a fan-out succeeded and others did not.
    #[error("Operação incompleta. Registrado: {}. Falhou: {}.", recorded.join(", "), failed.join(", "))]
    PartialFailure {
        recorded: Vec<String>,
        failed: Vec<String>,
    },
}

impl UiError {
    /// Generic message for a rejected write when the server gave no reason.
    pub const GENERIC_WRITE: &'static str = "Erro ao salvar.";

    pub fn rejected(status: u16, message: Option<String>) -> Self {
        UiError::Rejected {
            status,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| Self::GENERIC_WRITE.to_string()),
        }
    }
}

impl From<gloo_net::Error> for UiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => UiError::Decode(e.to_string()),
            other => UiError::Network(other.to_string()),
        }
    }
}
