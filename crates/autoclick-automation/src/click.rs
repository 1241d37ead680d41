//! 클릭 실행기.
//!
//! 목표 좌표로 포인터를 옮긴 뒤 클릭한다. 클릭 후 안정화 대기 시간은
//! 주입된 RNG로 뽑아 호출자에게 넘기고, 대기 자체는 세션 러너가 수행한다.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use autoclick_core::config::ActuationConfig;
use autoclick_core::error::CoreError;
use autoclick_core::models::region::Coordinates;
use autoclick_core::ports::input_driver::InputDriver;

/// 클릭 실행기
pub struct ClickActuator {
    driver: Arc<dyn InputDriver>,
    timing: ActuationConfig,
}

impl ClickActuator {
    pub fn new(driver: Arc<dyn InputDriver>, timing: ActuationConfig) -> Self {
        Self { driver, timing }
    }

    /// 클릭 후 안정화 대기 시간: `[min, max]` 균등 분포 (기본 2.5~4.0초)
    pub fn draw_settle<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let (lo, hi) = if self.timing.click_settle_min_ms <= self.timing.click_settle_max_ms {
            (self.timing.click_settle_min_ms, self.timing.click_settle_max_ms)
        } else {
            (self.timing.click_settle_max_ms, self.timing.click_settle_min_ms)
        };
        Duration::from_millis(rng.random_range(lo..=hi))
    }

    /// 포인터 이동 → 짧은 대기 → 클릭
    pub async fn press(&self, target: Coordinates) -> Result<(), CoreError> {
        self.driver
            .move_pointer(
                target.x,
                target.y,
                Duration::from_millis(self.timing.click_move_ms),
            )
            .await?;
        tokio::time::sleep(Duration::from_millis(self.timing.click_pre_delay_ms)).await;
        self.driver.click(target.x, target.y).await?;
        debug!(%target, "클릭 완료");
        Ok(())
    }
}
