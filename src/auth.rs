//! Session Identity
//!
//! 호출자 신원 해석. 세션 발급/검증은 상위 경계 레이어의 책임이고,
//! 이 크레이트는 해석된 신원을 명시적 파라미터로 전달받습니다.
//! (숨은 전역 "current user" 접근자를 두지 않음)

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// 인증된 사용자
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// 요청 단위 세션 컨텍스트
///
/// `user`가 `None`이면 비로그인 요청입니다.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user: Option<AuthUser>,
}

impl SessionContext {
    /// 로그인된 세션 생성
    pub fn authenticated(user: AuthUser) -> Self {
        Self { user: Some(user) }
    }

    /// 비로그인 세션 생성
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

/// 세션에서 인증된 사용자를 꺼내거나 `Unauthorized`로 실패
///
/// 모든 명령은 저장소 접근 전에 반드시 이 검사를 통과해야 합니다.
pub fn require_user(session: &SessionContext) -> Result<&AuthUser, HistoryError> {
    session.user.as_ref().ok_or(HistoryError::Unauthorized)
}
