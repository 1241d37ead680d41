//! 감시 영역 샘플러.
//!
//! 1차: 화면 경계로 클램프한 영역을 직접 캡처.
//! 폴백: 전체 화면 캡처 후 같은 영역을 잘라냄.
//! 둘 다 실패하면 `CoreError::Capture`: 호출자는 해당 틱을 건너뛴다.

use std::sync::Arc;

use autoclick_core::error::CoreError;
use autoclick_core::models::region::ScreenRegion;
use autoclick_core::models::sample::PixelSample;
use autoclick_core::ports::vision::ScreenCapture;
use tracing::{debug, warn};

/// 샘플을 얻은 경로
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTier {
    /// 영역 직접 캡처
    Region,
    /// 전체 화면 캡처 + 자르기
    FullscreenCrop,
}

/// 영역 샘플러: 캡처 포트 하나 뒤에 1차/폴백 두 단계를 둔다.
pub struct RegionSampler {
    capture: Arc<dyn ScreenCapture>,
}

impl RegionSampler {
    pub fn new(capture: Arc<dyn ScreenCapture>) -> Self {
        Self { capture }
    }

    /// 영역 샘플 캡처
    pub fn capture(&self, region: &ScreenRegion) -> Result<PixelSample, CoreError> {
        self.capture_with_tier(region).map(|(sample, _)| sample)
    }

    /// 영역 샘플 캡처 + 사용한 경로
    pub fn capture_with_tier(
        &self,
        region: &ScreenRegion,
    ) -> Result<(PixelSample, CaptureTier), CoreError> {
        match self.capture_region(region) {
            Ok(sample) => Ok((sample, CaptureTier::Region)),
            Err(primary) => {
                warn!("영역 캡처 실패, 전체 화면 폴백: {primary}");
                match self.capture_fullscreen_crop(region) {
                    Ok(sample) => Ok((sample, CaptureTier::FullscreenCrop)),
                    Err(fallback) => Err(CoreError::Capture(format!(
                        "영역 캡처 실패 ({primary}), 전체 화면 폴백 실패 ({fallback})"
                    ))),
                }
            }
        }
    }

    fn capture_region(&self, region: &ScreenRegion) -> Result<PixelSample, CoreError> {
        let screen = self.capture.screen_size()?;
        let clamped = region
            .clamp_to(screen)
            .ok_or_else(|| CoreError::Capture(format!("영역이 화면 밖: {region:?}")))?;

        let frame = self.capture.capture_region(&clamped)?;
        if frame.pixels.len() != clamped.pixel_count() {
            return Err(CoreError::Capture(format!(
                "캡처 크기 불일치: 기대 {}x{}, 실제 {}x{}",
                clamped.width, clamped.height, frame.width, frame.height
            )));
        }

        debug!(
            backend = self.capture.name(),
            width = clamped.width,
            height = clamped.height,
            "영역 캡처"
        );
        Ok(frame.into_sample())
    }

    fn capture_fullscreen_crop(&self, region: &ScreenRegion) -> Result<PixelSample, CoreError> {
        let frame = self.capture.capture_fullscreen()?;
        frame.crop(region).ok_or_else(|| {
            CoreError::Capture(format!(
                "영역이 화면({}x{}) 밖: {region:?}",
                frame.width, frame.height
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoclick_core::models::region::ScreenSize;
    use autoclick_core::models::sample::PixelFrame;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 화면 = 픽셀 값이 인덱스인 가상 프레임
    struct FakeScreen {
        size: ScreenSize,
        region_fails: bool,
        fullscreen_fails: bool,
        region_calls: AtomicUsize,
        fullscreen_calls: AtomicUsize,
    }

    impl FakeScreen {
        fn new(width: u32, height: u32) -> Self {
            Self {
                size: ScreenSize::new(width, height),
                region_fails: false,
                fullscreen_fails: false,
                region_calls: AtomicUsize::new(0),
                fullscreen_calls: AtomicUsize::new(0),
            }
        }

        fn frame(&self) -> PixelFrame {
            let pixels = (0..self.size.width * self.size.height).collect();
            PixelFrame::new(self.size.width, self.size.height, pixels)
        }
    }

    impl ScreenCapture for FakeScreen {
        fn capture_region(&self, region: &ScreenRegion) -> Result<PixelFrame, CoreError> {
            self.region_calls.fetch_add(1, Ordering::SeqCst);
            if self.region_fails {
                return Err(CoreError::Capture("region".into()));
            }
            let sample = self.frame().crop(region).unwrap();
            Ok(PixelFrame::new(region.width, region.height, sample.pixels().to_vec()))
        }

        fn capture_fullscreen(&self) -> Result<PixelFrame, CoreError> {
            self.fullscreen_calls.fetch_add(1, Ordering::SeqCst);
            if self.fullscreen_fails {
                return Err(CoreError::Capture("fullscreen".into()));
            }
            Ok(self.frame())
        }

        fn screen_size(&self) -> Result<ScreenSize, CoreError> {
            Ok(self.size)
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    #[test]
    fn primary_tier_used_when_region_capture_works() {
        let screen = Arc::new(FakeScreen::new(100, 100));
        let sampler = RegionSampler::new(screen.clone());

        let (sample, tier) = sampler
            .capture_with_tier(&ScreenRegion::new(10, 10, 50, 50))
            .unwrap();
        assert_eq!(tier, CaptureTier::Region);
        assert_eq!(sample.len(), 2_500);
        assert_eq!(screen.fullscreen_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn primary_capture_is_clamped_to_screen() {
        let screen = Arc::new(FakeScreen::new(100, 100));
        let sampler = RegionSampler::new(screen);

        let sample = sampler.capture(&ScreenRegion::new(80, -10, 50, 50)).unwrap();
        assert_eq!(sample.len(), 20 * 40);
    }

    #[test]
    fn fallback_crops_same_pixels_as_primary() {
        let region = ScreenRegion::new(90, 95, 50, 50);

        let primary = RegionSampler::new(Arc::new(FakeScreen::new(100, 100)))
            .capture(&region)
            .unwrap();

        let mut failing = FakeScreen::new(100, 100);
        failing.region_fails = true;
        let (fallback, tier) = RegionSampler::new(Arc::new(failing))
            .capture_with_tier(&region)
            .unwrap();

        assert_eq!(tier, CaptureTier::FullscreenCrop);
        assert_eq!(fallback, primary);
        assert_eq!(fallback.len(), 10 * 5);
    }

    #[test]
    fn both_tiers_failing_is_capture_error() {
        let mut screen = FakeScreen::new(100, 100);
        screen.region_fails = true;
        screen.fullscreen_fails = true;
        let sampler = RegionSampler::new(Arc::new(screen));

        let err = sampler.capture(&ScreenRegion::new(0, 0, 50, 50)).unwrap_err();
        assert!(matches!(err, CoreError::Capture(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn off_screen_region_is_capture_error() {
        let screen = Arc::new(FakeScreen::new(100, 100));
        let sampler = RegionSampler::new(screen.clone());

        let result = sampler.capture(&ScreenRegion::new(500, 500, 50, 50));
        assert!(matches!(result, Err(CoreError::Capture(_))));
        // 1차에서 클램프 실패 → 폴백 시도 후 실패
        assert_eq!(screen.region_calls.load(Ordering::SeqCst), 0);
        assert_eq!(screen.fullscreen_calls.load(Ordering::SeqCst), 1);
    }
}
