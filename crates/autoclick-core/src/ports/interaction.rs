//! 사용자 개입 포트.
//!
//! 자동화가 멈췄을 때 사람의 "재개" 입력을 기다리는 게이트.

use async_trait::async_trait;

use crate::error::CoreError;

/// 재개 게이트 응답
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSignal {
    /// 사용자가 재개를 요청함 (빈 입력 포함 아무 줄)
    Resume,
    /// 입력 채널이 닫힘: 더 이상 재개할 수 없음
    Closed,
}

/// 재개 게이트: 일시정지 중 블로킹 대기
#[async_trait]
pub trait ResumeGate: Send + Sync {
    /// 재개 신호가 올 때까지 대기
    async fn wait_for_resume(&self) -> Result<ResumeSignal, CoreError>;
}
