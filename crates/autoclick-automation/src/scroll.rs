//! 스크롤 에스컬레이션.
//!
//! 무변화가 이어지면 시도 횟수(단계)에 따라 점점 강한 스크롤 패턴을 실행한다.
//! 계획(순수, RNG 주입)과 실행(입력 드라이버)을 분리한다.
//!
//! | 단계 | 패턴 |
//! |------|------|
//! | 1 | 아래 100~150 |
//! | 2 | 위 50~80, 300ms, 아래 160~200 |
//! | 3 | 아래 250~350 |
//! | 4+ | 50%: 아래 120~180 ×2 (각 200ms) / 50%: 위 30~60, 400ms, 아래 220~280 |

use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use autoclick_core::config::ActuationConfig;
use autoclick_core::error::CoreError;
use autoclick_core::models::gesture::ScrollDelta;
use autoclick_core::models::region::Coordinates;
use autoclick_core::ports::input_driver::InputDriver;

/// 제스처 하나: 목표 근처로 이동, 스크롤, 원위치
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollGesture {
    /// 로그용 이름
    pub label: &'static str,
    /// 목표 좌표 대비 흔들림
    pub offset_x: i32,
    pub offset_y: i32,
    pub delta: ScrollDelta,
    /// 이 제스처 뒤 추가 대기
    pub pause_after: Duration,
}

/// 한 번의 에스컬레이션 계획
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPlan {
    pub tier: u32,
    pub gestures: Vec<ScrollGesture>,
}

/// 단계별 스크롤 계획 생성 (입력 없음)
///
/// 0단계는 1단계로 취급한다.
pub fn plan_escalation<R: Rng + ?Sized>(tier: u32, jitter_px: i32, rng: &mut R) -> EscalationPlan {
    let mut planner = Planner {
        jitter: jitter_px.abs(),
        rng,
        gestures: Vec::new(),
    };

    match tier {
        0 | 1 => {
            planner.down("초기 스크롤", 100..=150, 0);
        }
        2 => {
            planner.up("살짝 위로", 50..=80, 300);
            planner.down("중간 아래로", 160..=200, 0);
        }
        3 => {
            planner.down("큰 스크롤", 250..=350, 0);
        }
        _ => {
            if planner.rng.random_bool(0.5) {
                planner.down("연속 아래로 1", 120..=180, 200);
                planner.down("연속 아래로 2", 120..=180, 200);
            } else {
                planner.up("위로 조정", 30..=60, 400);
                planner.down("강하게 아래로", 220..=280, 0);
            }
        }
    }

    EscalationPlan {
        tier,
        gestures: planner.gestures,
    }
}

struct Planner<'a, R: Rng + ?Sized> {
    jitter: i32,
    rng: &'a mut R,
    gestures: Vec<ScrollGesture>,
}

impl<R: Rng + ?Sized> Planner<'_, R> {
    fn push(&mut self, label: &'static str, delta: ScrollDelta, pause_ms: u64) {
        let offset_x = self.rng.random_range(-self.jitter..=self.jitter);
        let offset_y = self.rng.random_range(-self.jitter..=self.jitter);
        self.gestures.push(ScrollGesture {
            label,
            offset_x,
            offset_y,
            delta,
            pause_after: Duration::from_millis(pause_ms),
        });
    }

    fn down(&mut self, label: &'static str, amount: RangeInclusive<u32>, pause_ms: u64) {
        let amount = self.rng.random_range(amount);
        self.push(label, ScrollDelta::down(amount), pause_ms);
    }

    fn up(&mut self, label: &'static str, amount: RangeInclusive<u32>, pause_ms: u64) {
        let amount = self.rng.random_range(amount);
        self.push(label, ScrollDelta::up(amount), pause_ms);
    }
}

/// 스크롤 에스컬레이터
pub struct ScrollEscalator {
    driver: Arc<dyn InputDriver>,
    timing: ActuationConfig,
}

impl ScrollEscalator {
    pub fn new(driver: Arc<dyn InputDriver>, timing: ActuationConfig) -> Self {
        Self { driver, timing }
    }

    /// 설정된 흔들림 폭으로 계획 생성
    pub fn plan<R: Rng + ?Sized>(&self, tier: u32, rng: &mut R) -> EscalationPlan {
        plan_escalation(tier, self.timing.scroll_jitter_px, rng)
    }

    /// 계획 실행. 제스처 하나가 실패하면 나머지는 건너뛰고 에러 반환.
    pub async fn execute(&self, target: Coordinates, plan: &EscalationPlan) -> Result<(), CoreError> {
        let screen = self.driver.screen_size().await?;

        for gesture in &plan.gestures {
            let point = target
                .offset(gesture.offset_x, gesture.offset_y)
                .clamp_to(screen);
            self.perform(point, gesture).await?;
            info!(
                tier = plan.tier,
                "{} 근처 {}: {}",
                target,
                gesture.label,
                gesture.delta
            );
            if !gesture.pause_after.is_zero() {
                tokio::time::sleep(gesture.pause_after).await;
            }
        }

        debug!(tier = plan.tier, "스크롤 에스컬레이션 완료");
        Ok(())
    }

    /// 계획 + 실행
    pub async fn escalate<R: Rng + ?Sized>(
        &self,
        target: Coordinates,
        tier: u32,
        rng: &mut R,
    ) -> Result<EscalationPlan, CoreError> {
        let plan = self.plan(tier, rng);
        self.execute(target, &plan).await?;
        Ok(plan)
    }

    /// 1~4단계를 한 번씩 실행 (`scroll-test` 명령).
    ///
    /// 단계 사이에 `pause`만큼 쉬며, 종료 신호가 오면 남은 단계를 건너뛴다.
    /// 반환값은 실행한 단계 수.
    pub async fn sweep_tiers<R: Rng + ?Sized>(
        &self,
        target: Coordinates,
        pause: Duration,
        rng: &mut R,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<u32, CoreError> {
        let mut executed = 0;
        for tier in 1..=4 {
            if *shutdown.borrow() {
                break;
            }
            info!(tier, "스크롤 테스트 {tier}단계");
            self.escalate(target, tier, rng).await?;
            executed += 1;

            if tier < 4 {
                tokio::select! {
                    _ = tokio::time::sleep(pause) => {}
                    _ = shutdown.changed() => break,
                }
            }
        }
        Ok(executed)
    }

    /// 포인터 저장 → 이동 → 스크롤 → 복귀
    ///
    /// 스크롤이 실패해도 복귀는 시도한다.
    async fn perform(&self, point: Coordinates, gesture: &ScrollGesture) -> Result<(), CoreError> {
        let original = self.driver.pointer_position().await?;
        let move_duration = Duration::from_millis(self.timing.gesture_move_ms);

        let result: Result<(), CoreError> = async {
            self.driver
                .move_pointer(point.x, point.y, move_duration)
                .await?;
            tokio::time::sleep(Duration::from_millis(self.timing.gesture_pre_scroll_ms)).await;
            self.driver.scroll(gesture.delta).await
        }
        .await;

        let restored = self
            .driver
            .move_pointer(original.x, original.y, move_duration)
            .await;
        if let Err(e) = &restored {
            warn!("포인터 복귀 실패: {e}");
        }

        result?;
        restored?;
        tokio::time::sleep(Duration::from_millis(self.timing.gesture_post_scroll_ms)).await;
        Ok(())
    }
}
