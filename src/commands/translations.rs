//! Translation History Commands
//!
//! 클립보드 번역 히스토리 CRUD 핸들러.
//! 모든 핸들러는 입력 검증 → 신원 확인 → 단일 저장소 연산 순서로 동작하고,
//! 저장소 접근은 항상 호출자의 user_id로 한정됩니다.

use serde::{Deserialize, Serialize};

use crate::auth::{require_user, SessionContext};
use crate::db::{DbState, TranslationPatch};
use crate::error::{CommandError, CommandResult, HistoryError};
use crate::models::{ApiResponse, TranslationRecord};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranslationArgs {
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub original_text: String,
    pub translated_text: String,
    pub context_hint: Option<String>,
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTranslationArgs {
    pub id: String,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub original_text: Option<String>,
    pub translated_text: Option<String>,
    pub context_hint: Option<String>,
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTranslationArgs {
    pub id: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListTranslationsArgs {
    #[serde(default)]
    pub favorites_only: bool,
}

/// 단일 레코드 응답 데이터
#[derive(Debug, Serialize)]
pub struct TranslationData {
    pub translation: TranslationRecord,
}

/// 목록 응답 데이터
#[derive(Debug, Serialize)]
pub struct TranslationListData {
    pub items: Vec<TranslationRecord>,
    pub total: usize,
}

/// 삭제 응답 데이터 (`{}` 로 직렬화)
#[derive(Debug, Serialize)]
pub struct EmptyData {}

/// 번역 기록 생성
///
/// `id`와 `createdAt`은 서버에서 생성하고, `userId`는 항상 세션의
/// 사용자로 강제됩니다 (클라이언트가 지정할 방법 자체가 없음).
pub fn create_translation(
    args: CreateTranslationArgs,
    session: &SessionContext,
    db_state: &DbState,
) -> CommandResult<ApiResponse<TranslationData>> {
    // 구조 검증은 저장소는 물론 신원 확인보다도 먼저 수행 (경계 레이어 검증에 해당)
    if args.original_text.is_empty() {
        return Err(HistoryError::Validation(
            "originalText must not be empty.".to_string(),
        )
        .into());
    }
    if args.translated_text.is_empty() {
        return Err(HistoryError::Validation(
            "translatedText must not be empty.".to_string(),
        )
        .into());
    }

    let user = require_user(session).map_err(CommandError::from)?;

    let record = TranslationRecord {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        source_language: args.source_language,
        target_language: args.target_language,
        original_text: args.original_text,
        translated_text: args.translated_text,
        context_hint: args.context_hint,
        is_favorite: args.is_favorite.unwrap_or(false),
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    db.insert_translation(&record).map_err(CommandError::from)?;

    Ok(ApiResponse::ok(TranslationData {
        translation: record,
    }))
}

/// 번역 기록 부분 수정
///
/// 요청에 포함된 필드만 교체합니다. 생략된 필드는 기존 값 그대로 유지.
/// 존재하지 않는 id와 다른 사용자 소유의 id는 동일하게 NOT_FOUND로 응답합니다.
pub fn update_translation(
    args: UpdateTranslationArgs,
    session: &SessionContext,
    db_state: &DbState,
) -> CommandResult<ApiResponse<TranslationData>> {
    let patch = TranslationPatch {
        source_language: args.source_language,
        target_language: args.target_language,
        original_text: args.original_text,
        translated_text: args.translated_text,
        context_hint: args.context_hint,
        is_favorite: args.is_favorite,
    };

    // id만 있는 요청은 신원 확인/저장소 접근 전에 거부
    if patch.is_empty() {
        return Err(HistoryError::Validation(
            "At least one field must be provided to update.".to_string(),
        )
        .into());
    }

    let user = require_user(session).map_err(CommandError::from)?;

    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let mut record = db
        .find_translation(&args.id, &user.id)
        .map_err(CommandError::from)?
        .ok_or_else(|| CommandError::from(HistoryError::TranslationNotFound(args.id.clone())))?;

    patch.apply_to(&mut record);

    let affected = db.update_translation(&record).map_err(CommandError::from)?;
    if affected == 0 {
        return Err(HistoryError::TranslationNotFound(args.id).into());
    }

    Ok(ApiResponse::ok(TranslationData {
        translation: record,
    }))
}

/// 번역 기록 삭제
///
/// id + user_id 복합 조건의 DELETE 한 문장으로 수행하므로
/// 읽고-지우기 사이의 소유권 변경 창이 없습니다.
pub fn delete_translation(
    args: DeleteTranslationArgs,
    session: &SessionContext,
    db_state: &DbState,
) -> CommandResult<ApiResponse<EmptyData>> {
    let user = require_user(session).map_err(CommandError::from)?;

    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let affected = db
        .delete_translation(&args.id, &user.id)
        .map_err(CommandError::from)?;
    if affected == 0 {
        // 이미 삭제됐거나 처음부터 없던 id 모두 같은 결과
        return Err(HistoryError::TranslationNotFound(args.id).into());
    }

    Ok(ApiResponse::ok(EmptyData {}))
}

/// 번역 기록 목록 조회
///
/// 호출자 본인의 레코드 전체(또는 즐겨찾기만)를 정렬 없이 반환합니다.
pub fn list_translations(
    args: ListTranslationsArgs,
    session: &SessionContext,
    db_state: &DbState,
) -> CommandResult<ApiResponse<TranslationListData>> {
    let user = require_user(session).map_err(CommandError::from)?;

    let db = db_state.0.lock().map_err(|e| CommandError {
        code: "LOCK_ERROR".to_string(),
        message: format!("Failed to acquire database lock: {}", e),
        details: None,
    })?;

    let items = db
        .list_translations(&user.id, args.favorites_only)
        .map_err(CommandError::from)?;
    let total = items.len();

    Ok(ApiResponse::ok(TranslationListData { items, total }))
}
