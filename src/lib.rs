//! Cliptrans - Clipboard Translation History Backend
//!
//! 복사한 텍스트의 번역 기록을 사용자별로 저장/수정/조회하는 Rust 백엔드
//! 라이브러리입니다. 번역 자체는 외부 엔진이 수행하며, 여기서는 원문-번역문
//! 쌍과 언어 힌트, 즐겨찾기 플래그만 SQLite에 보관합니다.
//!
//! 세션 발급과 라우팅은 이 크레이트 범위 밖입니다. 호스트(경계 레이어)가
//! 신원을 한 번 해석해 [`auth::SessionContext`]로 넘기고, 각 명령은 저장소
//! 접근 전에 반드시 그 신원을 확인합니다.

pub mod auth;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;

use std::path::Path;

use db::{Database, DbState};
use error::HistoryError;

/// 데이터베이스 연결 + 스키마 초기화 후 공유 상태로 래핑
///
/// 호스트 앱의 시작 시점에 한 번 호출해 명령 핸들러들에 넘겨줄
/// [`DbState`]를 만듭니다.
pub fn init_database(path: &Path) -> Result<DbState, HistoryError> {
    let db = Database::new(path)?;
    db.initialize()?;
    Ok(DbState(std::sync::Mutex::new(db)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_database_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("cliptrans.db");

        let state = init_database(&db_path).unwrap();
        assert!(db_path.exists());

        // 초기화된 상태로 바로 명령을 받을 수 있어야 함
        let db = state.0.lock().unwrap();
        let items = db.list_translations("user-a", false).unwrap();
        assert!(items.is_empty());
    }
}
