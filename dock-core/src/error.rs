use thiserror::Error;

/// SQLSTATE class of completion-with-warning conditions.
pub const WARNING_STATE_CLASS: &str = "01";
/// SQLSTATE reported when a referenced object does not exist.
pub const UNDEFINED_NAME_STATE: &str = "42704";

/// Failures raised by the adapter itself.
///
/// They travel inside [`crate::Error`]; match on them with
/// `error.downcast_ref::<AdapterError>()`.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("The connection configuration has no identity")]
    MissingIdentity,
    #[error("A connection with identity `{0}` is already registered")]
    DuplicateIdentity(String),
    #[error("No connection with identity `{0}` is registered")]
    UnknownIdentity(String),
    #[error("Collection `{collection}` is not registered on connection `{identity}`")]
    UnknownSchema {
        identity: String,
        collection: String,
    },
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// An engine failure as reported by the driver: SQLSTATE plus native message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{state}] {message}")]
pub struct DriverError {
    pub state: String,
    pub message: String,
}

impl DriverError {
    pub fn new(state: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            message: message.into(),
        }
    }

    /// The state belongs to the warning class, the engine completed the statement.
    pub fn is_warning(&self) -> bool {
        self.state.starts_with(WARNING_STATE_CLASS)
    }

    pub fn is_not_found(&self) -> bool {
        self.state == UNDEFINED_NAME_STATE
    }
}

/// Finds the [`DriverError`] carried by `error`, directly or through [`AdapterError::Driver`].
pub fn driver_error(error: &crate::Error) -> Option<&DriverError> {
    error
        .downcast_ref::<DriverError>()
        .or_else(|| match error.downcast_ref::<AdapterError>() {
            Some(AdapterError::Driver(e)) => Some(e),
            _ => None,
        })
}
