//! 화면 캡처 포트.
//!
//! 구현: `autoclick-vision` crate (xcap 어댑터, NoOp)

use crate::error::CoreError;
use crate::models::region::{ScreenRegion, ScreenSize};
use crate::models::sample::PixelFrame;

/// 화면 캡처: 영역 캡처(1차)와 전체 화면 캡처(폴백)를 제공한다.
///
/// 캡처는 짧은 동기 호출이다. 실패는 모두 [`CoreError::Capture`]로 보고한다.
pub trait ScreenCapture: Send + Sync {
    /// 화면 좌표계의 영역 캡처. 영역은 이미 화면 경계로 클램프된 상태로 전달된다.
    fn capture_region(&self, region: &ScreenRegion) -> Result<PixelFrame, CoreError>;

    /// 전체 화면 캡처 (화면 좌표 원점 기준)
    fn capture_fullscreen(&self) -> Result<PixelFrame, CoreError>;

    /// 물리 화면 크기
    fn screen_size(&self) -> Result<ScreenSize, CoreError>;

    /// 구현체 이름 (로그용)
    fn name(&self) -> &str;
}
