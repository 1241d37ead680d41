//! autoclick 핵심 에러 타입.
//!
//! 어댑터 crate는 플랫폼 에러를 `map_err`로 이 타입에 매핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 화면 캡처 실패 (영역 캡처 + 전체 화면 폴백 모두 실패)
    #[error("캡처 실패: {0}")]
    Capture(String),

    /// 포인터 이동/클릭/스크롤 실패
    #[error("입력 실행 실패: {0}")]
    Actuation(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 장시간 무인 실행 중 복구 가능한 에러인지 여부.
    ///
    /// 캡처/입력 실패는 다음 틱에서 재시도한다.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CoreError::Capture(_) | CoreError::Actuation(_))
    }
}
