//! 스크린 캡처 어댑터.
//!
//! xcap 기반 주 모니터 캡처. 테스트용으로 항상 실패하는 NoOp 캡처도 둔다.

use autoclick_core::error::CoreError;
use autoclick_core::models::region::{ScreenRegion, ScreenSize};
use autoclick_core::models::sample::PixelFrame;
use autoclick_core::ports::vision::ScreenCapture;
use tracing::debug;

// ============================================================
// NoOpScreenCapture: 캡처 백엔드 없음
// ============================================================

/// 캡처 백엔드 없는 구현. 모든 캡처가 `CoreError::Capture`.
///
/// 모니터 루프는 캡처 실패를 틱 단위로 복구하므로 프로세스는 계속 돈다.
pub struct NoOpScreenCapture;

impl ScreenCapture for NoOpScreenCapture {
    fn capture_region(&self, region: &ScreenRegion) -> Result<PixelFrame, CoreError> {
        debug!(?region, "[NoOp] 영역 캡처");
        Err(CoreError::Capture("캡처 백엔드 없음".to_string()))
    }

    fn capture_fullscreen(&self) -> Result<PixelFrame, CoreError> {
        debug!("[NoOp] 전체 화면 캡처");
        Err(CoreError::Capture("캡처 백엔드 없음".to_string()))
    }

    fn screen_size(&self) -> Result<ScreenSize, CoreError> {
        Err(CoreError::Capture("캡처 백엔드 없음".to_string()))
    }

    fn name(&self) -> &str {
        "noop"
    }
}

// ============================================================
// XcapScreenCapture: 실제 화면 캡처
// ============================================================

/// 주 모니터 캡처 (xcap 기반)
///
/// macOS: 화면 기록 권한 필요
/// Linux: X11 또는 Wayland(xdg-desktop-portal)
pub struct XcapScreenCapture;

impl XcapScreenCapture {
    pub fn new() -> Self {
        Self
    }

    /// 주 모니터 (없으면 첫 번째 모니터)
    fn primary_monitor() -> Result<xcap::Monitor, CoreError> {
        let mut monitors = xcap::Monitor::all()
            .map_err(|e| CoreError::Capture(format!("모니터 목록 조회 실패: {e}")))?;

        if monitors.is_empty() {
            return Err(CoreError::Capture("모니터를 찾을 수 없음".to_string()));
        }
        let index = monitors
            .iter()
            .position(|m| m.is_primary().unwrap_or(false))
            .unwrap_or(0);
        Ok(monitors.swap_remove(index))
    }

    fn to_frame(image: xcap::image::RgbaImage) -> PixelFrame {
        PixelFrame::from_rgba(image.width(), image.height(), image.as_raw())
    }
}

impl Default for XcapScreenCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenCapture for XcapScreenCapture {
    fn capture_region(&self, region: &ScreenRegion) -> Result<PixelFrame, CoreError> {
        let monitor = Self::primary_monitor()?;
        let monitor_x = monitor
            .x()
            .map_err(|e| CoreError::Capture(format!("모니터 위치 조회 실패: {e}")))?;
        let monitor_y = monitor
            .y()
            .map_err(|e| CoreError::Capture(format!("모니터 위치 조회 실패: {e}")))?;

        // xcap 영역 좌표는 모니터 기준
        let rel_x = u32::try_from(region.origin_x - monitor_x)
            .map_err(|_| CoreError::Capture(format!("모니터 밖 영역: {region:?}")))?;
        let rel_y = u32::try_from(region.origin_y - monitor_y)
            .map_err(|_| CoreError::Capture(format!("모니터 밖 영역: {region:?}")))?;

        let image = monitor
            .capture_region(rel_x, rel_y, region.width, region.height)
            .map_err(|e| CoreError::Capture(format!("영역 캡처 실패: {e}")))?;

        Ok(Self::to_frame(image))
    }

    fn capture_fullscreen(&self) -> Result<PixelFrame, CoreError> {
        let image = Self::primary_monitor()?
            .capture_image()
            .map_err(|e| CoreError::Capture(format!("스크린 캡처 실패: {e}")))?;

        debug!("전체 화면 캡처 완료: {}x{}", image.width(), image.height());
        Ok(Self::to_frame(image))
    }

    fn screen_size(&self) -> Result<ScreenSize, CoreError> {
        let monitor = Self::primary_monitor()?;
        let width = monitor
            .width()
            .map_err(|e| CoreError::Capture(format!("모니터 크기 조회 실패: {e}")))?;
        let height = monitor
            .height()
            .map_err(|e| CoreError::Capture(format!("모니터 크기 조회 실패: {e}")))?;
        Ok(ScreenSize::new(width, height))
    }

    fn name(&self) -> &str {
        "xcap"
    }
}

/// 플랫폼별 캡처 생성 팩토리
pub fn create_platform_capture() -> Box<dyn ScreenCapture> {
    tracing::info!("화면 캡처 (xcap) 사용");
    Box::new(XcapScreenCapture::new())
}
