use thiserror::Error;

#[derive(Error, Debug)]
pub enum InjectError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    /// profile 的屬性存取器完全不可用，整次執行必須中止
    #[error("Fails to get properties of profile '{profile}': {message}")]
    ProfileProperties { profile: String, message: String },
}

pub type Result<T> = std::result::Result<T, InjectError>;

/// 單筆描述被丟棄的原因，執行會繼續
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSkip {
    #[error("Module type not found in '{spec}'")]
    MissingModuleType { spec: String },

    #[error("Fails to create module configuration for '{spec}': {reason}")]
    MalformedModule { spec: String, reason: String },
}

/// 整個 goal 變成 no-op 的原因，不會中止建置
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("No property prefix")]
    MissingPrefix,

    #[error("No active profile")]
    NoActiveProfiles,

    #[error("Plugin {group_id}:{artifact_id} is not set up")]
    PluginNotFound {
        group_id: String,
        artifact_id: String,
    },

    #[error("Unsupported configuration: {reason}")]
    UnsupportedConfiguration { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Serialization,
    BuildModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl InjectError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InjectError::IoError(_) => ErrorCategory::Io,
            InjectError::SerializationError(_) => ErrorCategory::Serialization,
            InjectError::ConfigError { .. }
            | InjectError::ConfigValidationError { .. }
            | InjectError::MissingConfigError { .. }
            | InjectError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            InjectError::ProfileProperties { .. } => ErrorCategory::BuildModel,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            InjectError::MissingConfigError { .. }
            | InjectError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
            InjectError::ConfigError { .. }
            | InjectError::ConfigValidationError { .. }
            | InjectError::SerializationError(_) => ErrorSeverity::High,
            InjectError::IoError(_) | InjectError::ProfileProperties { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the project file and the command line options"
            }
            ErrorCategory::Io => "Check that the project file exists and the output path is writable",
            ErrorCategory::Serialization => "Check the project model for values that cannot be serialized",
            ErrorCategory::BuildModel => {
                "Check that every active profile exposes its properties"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            InjectError::MissingConfigError { field } => {
                format!("缺少必要設定: {}", field)
            }
            InjectError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定 {} 無效: {}", field, reason)
            }
            InjectError::ProfileProperties { profile, .. } => {
                format!("無法讀取 profile '{}' 的屬性", profile)
            }
            other => other.to_string(),
        }
    }
}
