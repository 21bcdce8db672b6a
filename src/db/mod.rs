//! Database Module
//!
//! SQLite 데이터베이스 관리

mod schema;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::HistoryError;
use crate::models::TranslationRecord;

/// 기본 DB 파일명
const DEFAULT_DB_FILENAME: &str = "cliptrans.db";

/// 데이터베이스 상태 (앱 상태로 관리)
pub struct DbState(pub Mutex<Database>);

/// 부분 업데이트 필드 집합
///
/// `None`은 "요청에 포함되지 않음"을 뜻하며 기존 값을 유지합니다.
/// (명시적으로 빈 문자열을 보내는 것과 생략하는 것을 구분)
#[derive(Debug, Clone, Default)]
pub struct TranslationPatch {
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub original_text: Option<String>,
    pub translated_text: Option<String>,
    pub context_hint: Option<String>,
    pub is_favorite: Option<bool>,
}

impl TranslationPatch {
    /// 설정된 필드가 하나도 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.source_language.is_none()
            && self.target_language.is_none()
            && self.original_text.is_none()
            && self.translated_text.is_none()
            && self.context_hint.is_none()
            && self.is_favorite.is_none()
    }

    /// 설정된 필드만 레코드 위에 덮어쓰기
    ///
    /// `id`, `user_id`, `created_at`은 절대 변경하지 않습니다.
    pub fn apply_to(&self, record: &mut TranslationRecord) {
        if let Some(v) = &self.source_language {
            record.source_language = Some(v.clone());
        }
        if let Some(v) = &self.target_language {
            record.target_language = Some(v.clone());
        }
        if let Some(v) = &self.original_text {
            record.original_text = v.clone();
        }
        if let Some(v) = &self.translated_text {
            record.translated_text = v.clone();
        }
        if let Some(v) = &self.context_hint {
            record.context_hint = Some(v.clone());
        }
        if let Some(v) = self.is_favorite {
            record.is_favorite = v;
        }
    }
}

/// 데이터베이스 래퍼
pub struct Database {
    conn: Connection,
}

impl Database {
    /// 새 데이터베이스 연결 생성
    pub fn new(path: &Path) -> Result<Self, HistoryError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Opening database at: {:?}", path);
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// 인메모리 데이터베이스 연결 생성 (테스트용)
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// 데이터베이스 스키마 초기화
    pub fn initialize(&self) -> Result<(), HistoryError> {
        self.conn.execute_batch(schema::CREATE_SCHEMA)?;
        info!("Database schema initialized");
        Ok(())
    }

    /// 번역 레코드 저장
    pub fn insert_translation(&self, record: &TranslationRecord) -> Result<(), HistoryError> {
        self.conn.execute(
            "INSERT INTO clipboard_translation_history
             (id, user_id, source_language, target_language, original_text, translated_text, context_hint, is_favorite, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.id,
                record.user_id,
                record.source_language,
                record.target_language,
                record.original_text,
                record.translated_text,
                record.context_hint,
                record.is_favorite,
                record.created_at,
            ],
        )?;

        debug!("Inserted translation {}", record.id);
        Ok(())
    }

    /// id + user_id로 번역 레코드 조회 (소유권 검사를 조회 조건에 포함)
    pub fn find_translation(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<TranslationRecord>, HistoryError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, source_language, target_language, original_text, translated_text, context_hint, is_favorite, created_at
             FROM clipboard_translation_history WHERE id = ?1 AND user_id = ?2",
        )?;

        let record = stmt
            .query_row(params![id, user_id], row_to_record)
            .optional()?;
        Ok(record)
    }

    /// 번역 레코드 갱신 (id + user_id 복합 조건, 영향받은 행 수 반환)
    ///
    /// `created_at`은 생성 시 한 번만 기록되므로 갱신 대상이 아닙니다.
    pub fn update_translation(&self, record: &TranslationRecord) -> Result<usize, HistoryError> {
        let affected = self.conn.execute(
            "UPDATE clipboard_translation_history
             SET source_language = ?1, target_language = ?2, original_text = ?3,
                 translated_text = ?4, context_hint = ?5, is_favorite = ?6
             WHERE id = ?7 AND user_id = ?8",
            params![
                record.source_language,
                record.target_language,
                record.original_text,
                record.translated_text,
                record.context_hint,
                record.is_favorite,
                record.id,
                record.user_id,
            ],
        )?;

        debug!("Updated translation {} ({} row)", record.id, affected);
        Ok(affected)
    }

    /// 번역 레코드 삭제 (id + user_id 복합 조건 한 문장으로 수행)
    pub fn delete_translation(&self, id: &str, user_id: &str) -> Result<usize, HistoryError> {
        let affected = self.conn.execute(
            "DELETE FROM clipboard_translation_history WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        debug!("Deleted translation {} ({} row)", id, affected);
        Ok(affected)
    }

    /// 사용자의 번역 레코드 목록 조회
    ///
    /// 정렬/페이지네이션 없이 해당 사용자의 전체(또는 즐겨찾기) 레코드를 반환합니다.
    pub fn list_translations(
        &self,
        user_id: &str,
        favorites_only: bool,
    ) -> Result<Vec<TranslationRecord>, HistoryError> {
        let sql = if favorites_only {
            "SELECT id, user_id, source_language, target_language, original_text, translated_text, context_hint, is_favorite, created_at
             FROM clipboard_translation_history WHERE user_id = ?1 AND is_favorite = 1"
        } else {
            "SELECT id, user_id, source_language, target_language, original_text, translated_text, context_hint, is_favorite, created_at
             FROM clipboard_translation_history WHERE user_id = ?1"
        };

        let mut stmt = self.conn.prepare(sql)?;
        let iter = stmt.query_map(params![user_id], row_to_record)?;

        let mut records = Vec::new();
        for record in iter {
            records.push(record?);
        }
        Ok(records)
    }
}

/// SELECT 결과 행을 레코드로 매핑
fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<TranslationRecord> {
    Ok(TranslationRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        source_language: row.get(2)?,
        target_language: row.get(3)?,
        original_text: row.get(4)?,
        translated_text: row.get(5)?,
        context_hint: row.get(6)?,
        is_favorite: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// 기본 DB 경로 결정
///
/// `.env` 로드 후 `CLIPTRANS_DB` 환경변수가 있으면 그 경로를,
/// 없으면 현재 디렉토리의 `cliptrans.db`를 사용합니다.
pub fn default_db_path() -> PathBuf {
    let _ = dotenvy::dotenv();

    match std::env::var("CLIPTRANS_DB") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DB_FILENAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_record(id: &str, user_id: &str) -> TranslationRecord {
        TranslationRecord {
            id: id.to_string(),
            user_id: user_id.to_string(),
            source_language: Some("es".to_string()),
            target_language: Some("en".to_string()),
            original_text: "Hola".to_string(),
            translated_text: "Hello".to_string(),
            context_hint: None,
            is_favorite: false,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        // CREATE IF NOT EXISTS 이므로 반복 호출해도 실패하지 않아야 함
        db.initialize().unwrap();
    }

    #[test]
    fn test_find_is_scoped_by_user() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        let record = sample_record("t-1", "user-a");
        db.insert_translation(&record).unwrap();

        // 소유자는 조회 가능
        let found = db.find_translation("t-1", "user-a").unwrap();
        assert_eq!(found, Some(record));

        // 다른 사용자는 같은 id로도 조회 불가
        assert_eq!(db.find_translation("t-1", "user-b").unwrap(), None);
    }

    #[test]
    fn test_update_and_delete_report_affected_rows() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        let mut record = sample_record("t-1", "user-a");
        db.insert_translation(&record).unwrap();

        record.is_favorite = true;
        assert_eq!(db.update_translation(&record).unwrap(), 1);

        // 다른 사용자 조건으로는 0행
        record.user_id = "user-b".to_string();
        assert_eq!(db.update_translation(&record).unwrap(), 0);

        assert_eq!(db.delete_translation("t-1", "user-b").unwrap(), 0);
        assert_eq!(db.delete_translation("t-1", "user-a").unwrap(), 1);
        assert_eq!(db.delete_translation("t-1", "user-a").unwrap(), 0);
    }

    #[test]
    fn test_list_filters_favorites() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        let mut fav = sample_record("t-fav", "user-a");
        fav.is_favorite = true;
        db.insert_translation(&fav).unwrap();
        db.insert_translation(&sample_record("t-plain", "user-a")).unwrap();
        db.insert_translation(&sample_record("t-other", "user-b")).unwrap();

        let all = db.list_translations("user-a", false).unwrap();
        assert_eq!(all.len(), 2);

        let favorites = db.list_translations("user-a", true).unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "t-fav");
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("history.db");

        {
            let db = Database::new(&db_path).unwrap();
            db.initialize().unwrap();
            db.insert_translation(&sample_record("t-1", "user-a")).unwrap();
        }

        let db = Database::new(&db_path).unwrap();
        db.initialize().unwrap();
        let found = db.find_translation("t-1", "user-a").unwrap();
        assert!(found.is_some());
    }

    #[test]
    fn test_patch_apply_keeps_unset_fields() {
        let mut record = sample_record("t-1", "user-a");

        let patch = TranslationPatch {
            translated_text: Some("Hi".to_string()),
            is_favorite: Some(true),
            ..Default::default()
        };
        assert!(!patch.is_empty());

        patch.apply_to(&mut record);
        assert_eq!(record.translated_text, "Hi");
        assert!(record.is_favorite);
        // 나머지 필드는 그대로
        assert_eq!(record.original_text, "Hola");
        assert_eq!(record.source_language.as_deref(), Some("es"));

        assert!(TranslationPatch::default().is_empty());
    }
}
