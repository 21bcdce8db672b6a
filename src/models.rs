//! Cliptrans Data Models
//!
//! 프론트엔드 TypeScript 타입과 매핑되는 Rust 데이터 모델

use serde::{Deserialize, Serialize};

/// 클립보드 번역 히스토리 레코드
///
/// 번역 자체는 상위 레이어(외부 번역 엔진)에서 수행되고,
/// 여기에는 결과 텍스트 쌍만 저장됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "sourceLanguage")]
    pub source_language: Option<String>,
    #[serde(rename = "targetLanguage")]
    pub target_language: Option<String>,
    #[serde(rename = "originalText")]
    pub original_text: String,
    #[serde(rename = "translatedText")]
    pub translated_text: String,
    #[serde(rename = "contextHint")]
    pub context_hint: Option<String>,
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// 명령 성공 응답 envelope
///
/// 모든 명령은 `{ success: true, data: ... }` 형태로 응답합니다.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
