use crate::settings::ConfigurationError;

/// Exit code for file and JSON failures.
pub const EXIT_IO: u8 = 2;
/// Exit code for settings that fail validation.
pub const EXIT_CONFIG: u8 = 3;
/// Exit code for logging setup failures.
pub const EXIT_LOGGING: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ConfigurationError> for AppError {
    fn from(err: ConfigurationError) -> Self {
        Self::new(EXIT_CONFIG, format!("Configuration error: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_map_to_config_exit_code() {
        let err: AppError = ConfigurationError::CnnLimit {
            descriptor: "GramMatrices".to_string(),
            limit_to: 4,
            minimum: 16,
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_CONFIG);
        assert!(err.to_string().contains("GramMatrices requires limit_to >= 16"));
    }
}
