//! Database Schema
//!
//! SQLite 테이블 스키마 정의

/// 데이터베이스 스키마 생성 SQL
pub const CREATE_SCHEMA: &str = r#"
-- 클립보드 번역 히스토리 테이블
CREATE TABLE IF NOT EXISTS clipboard_translation_history (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    source_language TEXT,
    target_language TEXT,
    original_text TEXT NOT NULL,
    translated_text TEXT NOT NULL,
    context_hint TEXT,  -- "system", "browser", "app name" 등 캡처 출처
    is_favorite INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);

-- 히스토리 인덱스
CREATE INDEX IF NOT EXISTS idx_translations_user ON clipboard_translation_history(user_id);
CREATE INDEX IF NOT EXISTS idx_translations_user_favorite ON clipboard_translation_history(user_id, is_favorite);
"#;
