//! 모니터링 세션 러너.
//!
//! 상태 머신의 결정을 실제 캡처/입력/대기로 옮긴다. 한 틱은 끝까지 실행된 뒤
//! 다음 틱으로 넘어가며, 종료 신호는 틱 시작, 대기(sleep) 중, 재개 게이트 대기 중에만
//! 확인한다. 진행 중인 클릭/스크롤 제스처는 중단하지 않는다.

use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use autoclick_core::config::AppConfig;
use autoclick_core::error::CoreError;
use autoclick_core::models::region::ScreenRegion;
use autoclick_core::models::session::{SessionParams, SessionReport};
use autoclick_core::ports::input_driver::InputDriver;
use autoclick_core::ports::interaction::{ResumeGate, ResumeSignal};
use autoclick_core::ports::vision::ScreenCapture;
use autoclick_vision::classifier::ChangeClassifier;
use autoclick_vision::sampler::RegionSampler;

use crate::click::ClickActuator;
use crate::scroll::ScrollEscalator;
use crate::state_machine::{MonitorPhase, MonitorStateMachine, TickDecision};

/// 재개 게이트 오류 후 재시도 간격
const GATE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// 종료 신호가 오면 즉시 깨어나는 sleep. 종료 신호면 `true`.
async fn sleep_or_shutdown(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return true;
    }
    tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        _ = shutdown.changed() => true,
    }
}

/// 모니터링 세션
pub struct MonitorSession {
    params: SessionParams,
    config: AppConfig,
    region: ScreenRegion,
    sampler: RegionSampler,
    machine: MonitorStateMachine,
    clicker: ClickActuator,
    escalator: ScrollEscalator,
    gate: Arc<dyn ResumeGate>,
    rng: StdRng,
    report: SessionReport,
}

impl MonitorSession {
    pub fn new(
        params: SessionParams,
        config: &AppConfig,
        capture: Arc<dyn ScreenCapture>,
        driver: Arc<dyn InputDriver>,
        gate: Arc<dyn ResumeGate>,
        rng: StdRng,
    ) -> Self {
        let region = ScreenRegion::centered_on(params.target, config.monitor.region_size);
        let machine = MonitorStateMachine::new(
            ChangeClassifier::new(config.detection.clone()),
            params.max_scroll_attempts,
            &config.monitor,
        );

        Self {
            region,
            sampler: RegionSampler::new(capture),
            machine,
            clicker: ClickActuator::new(driver.clone(), config.actuation.clone()),
            escalator: ScrollEscalator::new(driver, config.actuation.clone()),
            gate,
            rng,
            report: SessionReport::start(),
            config: config.clone(),
            params,
        }
    }

    /// 감시 영역
    pub fn region(&self) -> ScreenRegion {
        self.region
    }

    /// 종료 신호까지 실행 후 집계 반환
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> SessionReport {
        info!(
            coordinates = %self.params.target,
            interval_ms = self.params.check_interval.as_millis() as u64,
            max_scroll_attempts = self.params.max_scroll_attempts,
            "모니터링 시작"
        );

        loop {
            if *shutdown.borrow() {
                self.machine.stop();
            }

            let stop = match self.machine.phase() {
                MonitorPhase::Stopped => break,
                MonitorPhase::Running => self.tick(&mut shutdown).await,
                MonitorPhase::Paused => self.wait_for_resume(&mut shutdown).await,
            };
            if stop {
                self.machine.stop();
            }
        }

        self.report.finish();
        info!(
            clicks = self.report.click_count,
            scrolls = self.report.scroll_count,
            pauses = self.report.pause_count,
            "모니터링 종료"
        );
        self.report
    }

    /// 한 틱 실행. 종료 신호를 받으면 `true`.
    async fn tick(&mut self, shutdown: &mut watch::Receiver<bool>) -> bool {
        let interval = self.params.check_interval;

        let sample = match self.sampler.capture(&self.region) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("캡처 실패, 다음 틱에 재시도: {e}");
                self.report.capture_failures += 1;
                return sleep_or_shutdown(interval, shutdown).await;
            }
        };

        self.report.ticks += 1;
        let (verdict, decision) = self.machine.on_sample(sample);
        let target = self.params.target;

        match decision {
            TickDecision::Click => {
                self.report.click_count += 1;
                info!(
                    click = self.report.click_count,
                    unique_colors = verdict.unique_color_count,
                    "유효한 변화 감지, {target} 클릭"
                );
                let settle = self.clicker.draw_settle(&mut self.rng);
                match self.clicker.press(target).await {
                    Ok(()) => {
                        info!("클릭 후 {:.1}초 대기", settle.as_secs_f64());
                        if sleep_or_shutdown(settle, shutdown).await {
                            return true;
                        }
                    }
                    Err(e) => self.record_actuation_failure("클릭", &e),
                }
                sleep_or_shutdown(interval, shutdown).await
            }
            TickDecision::Scroll { tier } => {
                self.report.scroll_count += 1;
                info!(tier, "{tier}번째 스크롤 시도");
                let plan = self.escalator.plan(tier, &mut self.rng);
                if let Err(e) = self.escalator.execute(target, &plan).await {
                    self.record_actuation_failure("스크롤", &e);
                }
                let settle = self
                    .config
                    .monitor
                    .scroll_settle(self.machine.scroll_attempts());
                debug!("스크롤 후 {:.1}초 대기", settle.as_secs_f64());
                if sleep_or_shutdown(settle, shutdown).await {
                    return true;
                }
                sleep_or_shutdown(interval, shutdown).await
            }
            TickDecision::Pause => {
                self.report.pause_count += 1;
                info!(
                    max_scroll_attempts = self.params.max_scroll_attempts,
                    "스크롤 한도 도달 후에도 변화 없음, 일시정지"
                );
                false
            }
            TickDecision::Idle => {
                debug!(
                    no_change_count = self.machine.no_change_count(),
                    unique_colors = verdict.unique_color_count,
                    "변화 없음"
                );
                sleep_or_shutdown(interval, shutdown).await
            }
        }
    }

    /// 일시정지 중 재개 입력 대기. 종료(또는 입력 종료)면 `true`.
    async fn wait_for_resume(&mut self, shutdown: &mut watch::Receiver<bool>) -> bool {
        if *shutdown.borrow() {
            return true;
        }

        let signal = tokio::select! {
            signal = self.gate.wait_for_resume() => signal,
            _ = shutdown.changed() => {
                info!("일시정지 중 종료 신호 수신");
                return true;
            }
        };

        match signal {
            Ok(ResumeSignal::Resume) => {
                info!("재개");
                self.machine.resume();
                false
            }
            Ok(ResumeSignal::Closed) => {
                info!("입력 종료, 세션 종료");
                true
            }
            Err(e) => {
                warn!("재개 입력 대기 실패: {e}");
                sleep_or_shutdown(GATE_RETRY_DELAY, shutdown).await
            }
        }
    }

    fn record_actuation_failure(&mut self, action: &str, error: &CoreError) {
        warn!("{action} 실행 실패, 계속 진행: {error}");
        self.report.actuation_failures += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sleep_wakes_on_shutdown() {
        let (tx, mut rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            sleep_or_shutdown(Duration::from_secs(3_600), &mut rx).await
        });
        tokio::task::yield_now().await;
        tx.send(true).unwrap();
        assert!(handle.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_completes_without_shutdown() {
        let (_tx, mut rx) = watch::channel(false);
        assert!(!sleep_or_shutdown(Duration::from_millis(10), &mut rx).await);
    }

    #[tokio::test]
    async fn sleep_returns_immediately_when_already_stopped() {
        let (tx, mut rx) = watch::channel(false);
        tx.send(true).unwrap();
        assert!(sleep_or_shutdown(Duration::from_secs(3_600), &mut rx).await);
    }
}
