use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API {status}")]
    StatusError { status: u16 },

    #[error("Backend reported an error: {message}")]
    BackendError { message: String },

    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Payload,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定的退出碼，任何錯誤都不會以 0 結束
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2, // 抓取失敗
            ErrorSeverity::High => 1,   // 設定錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl HubError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HubError::ApiError(_) | HubError::StatusError { .. } | HubError::BackendError { .. } => {
                ErrorCategory::Network
            }
            HubError::MalformedPayload { .. } | HubError::SerializationError(_) => {
                ErrorCategory::Payload
            }
            HubError::ConfigError { .. }
            | HubError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            HubError::CsvError(_) | HubError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 抓取失敗：可以重新執行
            ErrorCategory::Network | ErrorCategory::Payload => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HubError::ApiError(_) => "Check that the scraper backend is running and reachable",
            HubError::StatusError { .. } => "Inspect the backend logs for the failing endpoint",
            HubError::BackendError { .. } => {
                "Fix the backend configuration (API tokens, .env) and retry"
            }
            HubError::MalformedPayload { .. } | HubError::SerializationError(_) => {
                "The backend answered with an unexpected JSON shape; check its version"
            }
            HubError::CsvError(_) | HubError::IoError(_) => {
                "Check that the output path is writable"
            }
            HubError::ConfigError { .. }
            | HubError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML config file"
            }
        }
    }

    /// 給使用者看的訊息，頁面層的失敗一律顯示這個字串
    pub fn user_friendly_message(&self) -> String {
        match self {
            HubError::ApiError(e) if e.is_connect() => {
                "Could not connect to the scraper backend".to_string()
            }
            HubError::ApiError(e) if e.is_decode() => {
                "The backend response was not valid JSON".to_string()
            }
            HubError::BackendError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HubError>;
