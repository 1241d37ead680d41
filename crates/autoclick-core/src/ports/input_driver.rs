//! 입력 드라이버 포트.
//!
//! 포인터 이동/클릭/스크롤을 위한 크로스 플랫폼 인터페이스를 정의한다.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::CoreError;
use crate::models::gesture::ScrollDelta;
use crate::models::region::{Coordinates, ScreenSize};

/// 입력 드라이버: 포인터 시뮬레이션 인터페이스
///
/// 구현체: `EnigoInputDriver` (실제 입력), `NoOpInputDriver` (드라이런/테스트용)
#[async_trait]
pub trait InputDriver: Send + Sync {
    /// 포인터를 `duration` 동안 부드럽게 이동 (0이면 즉시)
    async fn move_pointer(&self, x: i32, y: i32, duration: Duration) -> Result<(), CoreError>;

    /// 현재 포인터 위치
    async fn pointer_position(&self) -> Result<Coordinates, CoreError>;

    /// 지정 좌표에서 왼쪽 버튼 클릭
    async fn click(&self, x: i32, y: i32) -> Result<(), CoreError>;

    /// 현재 포인터 위치에서 세로 스크롤
    async fn scroll(&self, delta: ScrollDelta) -> Result<(), CoreError>;

    /// 주 화면 크기
    async fn screen_size(&self) -> Result<ScreenSize, CoreError>;

    /// 플랫폼 이름 (예: "macos", "windows", "linux", "noop")
    fn platform(&self) -> &str;
}
