//! Cliptrans Error Types
//!
//! 애플리케이션 전역 에러 타입 정의

use serde::Serialize;
use thiserror::Error;

/// 번역 히스토리 에러
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("You must be signed in to perform this action.")]
    Unauthorized,

    // 존재하지 않는 id와 다른 사용자 소유의 id를 구분하지 않습니다 (존재 여부 노출 방지)
    #[error("Translation not found: {0}")]
    TranslationNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// 명령 응답용 직렬화 가능한 에러
#[derive(Debug, Serialize)]
pub struct CommandError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl From<HistoryError> for CommandError {
    fn from(error: HistoryError) -> Self {
        let code = match &error {
            HistoryError::Database(_) => "DB_ERROR",
            HistoryError::Io(_) => "IO_ERROR",
            HistoryError::Serialization(_) => "SERIALIZATION_ERROR",
            HistoryError::Unauthorized => "UNAUTHORIZED",
            HistoryError::TranslationNotFound(_) => "NOT_FOUND",
            HistoryError::Validation(_) => "VALIDATION_FAILED",
        };

        CommandError {
            code: code.to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

/// 명령 결과 타입
pub type CommandResult<T> = Result<T, CommandError>;
