use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Game generation failed for source '{source_name}': {message}")]
    GenerationError {
        source_name: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// CLI 結束碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SeriesError {
    pub fn generation(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GenerationError {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常重試即可
            SeriesError::HttpError(_) => ErrorSeverity::Medium,
            SeriesError::ConfigValidationError { .. }
            | SeriesError::InvalidConfigValueError { .. }
            | SeriesError::MissingConfigError { .. } => ErrorSeverity::High,
            SeriesError::SerializationError(_)
            | SeriesError::GenerationError { .. } => ErrorSeverity::High,
            SeriesError::IoError(_) | SeriesError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SeriesError::HttpError(_) => "無法從遠端來源取得比賽資料".to_string(),
            SeriesError::SerializationError(_) => "JSON 資料格式錯誤".to_string(),
            SeriesError::IoError(e) => format!("檔案讀寫失敗: {}", e),
            SeriesError::ZipError(_) => "壓縮輸出檔案失敗".to_string(),
            SeriesError::ConfigValidationError { field, .. }
            | SeriesError::InvalidConfigValueError { field, .. }
            | SeriesError::MissingConfigError { field } => {
                format!("配置檔欄位 '{}' 有誤", field)
            }
            SeriesError::GenerationError { source_name, .. } => {
                format!("比賽來源 '{}' 產生失敗", source_name)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SeriesError::HttpError(_) => "Check the endpoint URL and network connectivity, then retry",
            SeriesError::SerializationError(_) => "Make sure JSON sources contain an array of game records",
            SeriesError::IoError(_) => "Check that the paths exist and are readable/writable",
            SeriesError::ZipError(_) => "Disable output compression or check free disk space",
            SeriesError::ConfigValidationError { .. }
            | SeriesError::InvalidConfigValueError { .. }
            | SeriesError::MissingConfigError { .. } => "Fix the configuration file and run again",
            SeriesError::GenerationError { .. } => {
                "Inspect the game source named in the error; CSV files need a header row with id,date,home_team,visiting_team,home_score,visiting_score"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SeriesError>;
