//! 입력 드라이버 구현.
//!
//! `NoOpInputDriver` (드라이런/테스트용)와 `EnigoInputDriver` (실제 입력)을 제공한다.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

use autoclick_core::error::CoreError;
use autoclick_core::models::gesture::ScrollDelta;
use autoclick_core::models::region::{Coordinates, ScreenSize};
use autoclick_core::ports::input_driver::InputDriver;

// ============================================================
// NoOpInputDriver: 드라이런/테스트용
// ============================================================

/// No-Op 입력 드라이버: 모든 입력을 로깅만 하고 실행하지 않음
///
/// 포인터 위치만 메모리에 추적하므로 스크롤 제스처의 위치 복귀를 그대로 흉내낸다.
pub struct NoOpInputDriver {
    position: Mutex<Coordinates>,
    screen: ScreenSize,
}

impl NoOpInputDriver {
    /// 1920x1080 가상 화면, 포인터는 원점
    pub fn new() -> Self {
        Self::with_screen(ScreenSize::new(1920, 1080))
    }

    pub fn with_screen(screen: ScreenSize) -> Self {
        Self {
            position: Mutex::new(Coordinates::new(0, 0)),
            screen,
        }
    }

    fn lock_position(&self) -> Result<std::sync::MutexGuard<'_, Coordinates>, CoreError> {
        self.position
            .lock()
            .map_err(|e| CoreError::Internal(format!("포인터 상태 잠금 실패: {e}")))
    }
}

impl Default for NoOpInputDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputDriver for NoOpInputDriver {
    async fn move_pointer(&self, x: i32, y: i32, duration: Duration) -> Result<(), CoreError> {
        debug!(x, y, ?duration, "[NoOp] 포인터 이동");
        *self.lock_position()? = Coordinates::new(x, y);
        Ok(())
    }

    async fn pointer_position(&self) -> Result<Coordinates, CoreError> {
        Ok(*self.lock_position()?)
    }

    async fn click(&self, x: i32, y: i32) -> Result<(), CoreError> {
        debug!(x, y, "[NoOp] 마우스 클릭");
        *self.lock_position()? = Coordinates::new(x, y);
        Ok(())
    }

    async fn scroll(&self, delta: ScrollDelta) -> Result<(), CoreError> {
        debug!(%delta, "[NoOp] 스크롤");
        Ok(())
    }

    async fn screen_size(&self) -> Result<ScreenSize, CoreError> {
        Ok(self.screen)
    }

    fn platform(&self) -> &str {
        "noop"
    }
}

// ============================================================
// EnigoInputDriver: 실제 마우스 입력
// ============================================================

/// 부드러운 이동 시 한 스텝 간격 (밀리초)
#[cfg(feature = "enigo")]
const MOVE_STEP_MS: u64 = 10;

/// 휠 한 칸에 해당하는 스크롤 단위 (Windows WHEEL_DELTA)
#[cfg(feature = "enigo")]
const SCROLL_UNITS_PER_NOTCH: u32 = 120;

/// 실제 마우스 입력 드라이버 (enigo 기반)
///
/// macOS: Accessibility 권한 필요
/// Windows: UIAccess 또는 관리자 권한 필요
/// Linux: X11 또는 Wayland + uinput 권한 필요
#[cfg(feature = "enigo")]
pub struct EnigoInputDriver {
    /// enigo 인스턴스 (Send지만 !Sync → tokio::sync::Mutex 사용)
    enigo: tokio::sync::Mutex<enigo::Enigo>,
}

#[cfg(feature = "enigo")]
impl EnigoInputDriver {
    /// 새 EnigoInputDriver 생성
    pub fn new() -> Result<Self, CoreError> {
        let settings = enigo::Settings::default();
        let enigo = enigo::Enigo::new(&settings)
            .map_err(|e| CoreError::Actuation(format!("입력 드라이버 초기화 실패: {e}")))?;
        Ok(Self {
            enigo: tokio::sync::Mutex::new(enigo),
        })
    }

    async fn move_abs(&self, x: i32, y: i32) -> Result<(), CoreError> {
        use enigo::Mouse;
        let mut enigo = self.enigo.lock().await;
        enigo
            .move_mouse(x, y, enigo::Coordinate::Abs)
            .map_err(|e| CoreError::Actuation(format!("마우스 이동 실패: {e}")))
    }

    /// 스크롤 단위 → 휠 칸 수 (올림, 최소 1칸)
    fn notches(delta: ScrollDelta) -> i32 {
        let notches = delta.amount.div_ceil(SCROLL_UNITS_PER_NOTCH).max(1);
        let notches = i32::try_from(notches).unwrap_or(i32::MAX);
        match delta.direction {
            autoclick_core::models::gesture::ScrollDirection::Down => notches,
            autoclick_core::models::gesture::ScrollDirection::Up => -notches,
        }
    }
}

#[cfg(feature = "enigo")]
#[async_trait]
impl InputDriver for EnigoInputDriver {
    async fn move_pointer(&self, x: i32, y: i32, duration: Duration) -> Result<(), CoreError> {
        debug!(x, y, ?duration, "[Enigo] 포인터 이동");
        let steps = (duration.as_millis() as u64 / MOVE_STEP_MS).max(1) as u32;
        if steps == 1 {
            self.move_abs(x, y).await?;
            tokio::time::sleep(duration).await;
            return Ok(());
        }

        let start = self.pointer_position().await?;
        let step_sleep = duration / steps;
        for i in 1..=steps {
            let t = f64::from(i) / f64::from(steps);
            let px = start.x + (f64::from(x - start.x) * t).round() as i32;
            let py = start.y + (f64::from(y - start.y) * t).round() as i32;
            self.move_abs(px, py).await?;
            tokio::time::sleep(step_sleep).await;
        }
        Ok(())
    }

    async fn pointer_position(&self) -> Result<Coordinates, CoreError> {
        use enigo::Mouse;
        let enigo = self.enigo.lock().await;
        let (x, y) = enigo
            .location()
            .map_err(|e| CoreError::Actuation(format!("포인터 위치 조회 실패: {e}")))?;
        Ok(Coordinates::new(x, y))
    }

    async fn click(&self, x: i32, y: i32) -> Result<(), CoreError> {
        use enigo::Mouse;
        debug!(x, y, "[Enigo] 마우스 클릭");
        let mut enigo = self.enigo.lock().await;
        enigo
            .move_mouse(x, y, enigo::Coordinate::Abs)
            .map_err(|e| CoreError::Actuation(format!("마우스 이동 실패: {e}")))?;
        enigo
            .button(enigo::Button::Left, enigo::Direction::Click)
            .map_err(|e| CoreError::Actuation(format!("마우스 클릭 실패: {e}")))?;
        Ok(())
    }

    async fn scroll(&self, delta: ScrollDelta) -> Result<(), CoreError> {
        use enigo::Mouse;
        let notches = Self::notches(delta);
        debug!(%delta, notches, "[Enigo] 스크롤");
        let mut enigo = self.enigo.lock().await;
        enigo
            .scroll(notches, enigo::Axis::Vertical)
            .map_err(|e| CoreError::Actuation(format!("스크롤 실패: {e}")))?;
        Ok(())
    }

    async fn screen_size(&self) -> Result<ScreenSize, CoreError> {
        use enigo::Mouse;
        let enigo = self.enigo.lock().await;
        let (width, height) = enigo
            .main_display()
            .map_err(|e| CoreError::Actuation(format!("화면 크기 조회 실패: {e}")))?;
        let width = u32::try_from(width)
            .map_err(|_| CoreError::Actuation(format!("잘못된 화면 너비: {width}")))?;
        let height = u32::try_from(height)
            .map_err(|_| CoreError::Actuation(format!("잘못된 화면 높이: {height}")))?;
        Ok(ScreenSize::new(width, height))
    }

    fn platform(&self) -> &str {
        #[cfg(target_os = "macos")]
        {
            "macos"
        }
        #[cfg(target_os = "windows")]
        {
            "windows"
        }
        #[cfg(target_os = "linux")]
        {
            "linux"
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            "unknown"
        }
    }
}

/// 플랫폼별 입력 드라이버 생성 팩토리
///
/// `enigo` feature 활성화 시 실제 입력 드라이버 반환,
/// 비활성화(또는 초기화 실패) 시 NoOp 드라이버 반환.
pub fn create_platform_input_driver() -> Box<dyn InputDriver> {
    #[cfg(feature = "enigo")]
    {
        match EnigoInputDriver::new() {
            Ok(driver) => {
                tracing::info!("실제 입력 드라이버 (enigo) 초기화 완료");
                return Box::new(driver);
            }
            Err(e) => {
                tracing::warn!("enigo 초기화 실패, NoOp 폴백: {e}");
            }
        }
    }
    Box::new(NoOpInputDriver::new())
}

// ============================================================
// 테스트
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_driver_all_methods_ok() {
        let driver = NoOpInputDriver::new();
        assert!(driver
            .move_pointer(100, 200, Duration::from_millis(200))
            .await
            .is_ok());
        assert!(driver.click(100, 200).await.is_ok());
        assert!(driver.scroll(ScrollDelta::down(120)).await.is_ok());
        assert_eq!(
            driver.screen_size().await.unwrap(),
            ScreenSize::new(1920, 1080)
        );
    }

    #[tokio::test]
    async fn noop_driver_tracks_pointer() {
        let driver = NoOpInputDriver::with_screen(ScreenSize::new(800, 600));
        assert_eq!(driver.pointer_position().await.unwrap(), Coordinates::new(0, 0));

        driver.move_pointer(30, 40, Duration::ZERO).await.unwrap();
        assert_eq!(driver.pointer_position().await.unwrap(), Coordinates::new(30, 40));

        driver.click(300, 200).await.unwrap();
        assert_eq!(driver.pointer_position().await.unwrap(), Coordinates::new(300, 200));
    }

    #[test]
    fn noop_driver_platform() {
        let driver = NoOpInputDriver::new();
        assert_eq!(driver.platform(), "noop");
    }

    #[test]
    fn factory_creates_driver() {
        let driver = create_platform_input_driver();
        // enigo feature 비활성화 시 noop, 활성화 시 플랫폼별
        assert!(!driver.platform().is_empty());
    }

    #[cfg(feature = "enigo")]
    #[test]
    fn enigo_scroll_units_round_up_to_notches() {
        assert_eq!(EnigoInputDriver::notches(ScrollDelta::down(100)), 1);
        assert_eq!(EnigoInputDriver::notches(ScrollDelta::down(250)), 3);
        assert_eq!(EnigoInputDriver::notches(ScrollDelta::up(30)), -1);
    }
}
