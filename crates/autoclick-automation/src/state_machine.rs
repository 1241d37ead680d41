//! 모니터링 상태 머신.
//!
//! 틱마다 변화 판정을 받아 다음 행동(클릭/스크롤/일시정지/대기)을 결정한다.
//! I/O 없이 카운터와 상태만 다루므로 세션 러너와 분리해 테스트한다.
//!
//! ```text
//! Running ──(무변화 10회 + 스크롤 한도 소진)──▶ Paused
//! Paused  ──(재개 입력)──▶ Running
//! *       ──(종료 신호)──▶ Stopped
//! ```

use tracing::debug;

use autoclick_core::config::MonitorConfig;
use autoclick_core::models::sample::PixelSample;
use autoclick_core::models::verdict::ChangeVerdict;
use autoclick_vision::classifier::ChangeClassifier;

/// 모니터 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    /// 틱 진행 중
    Running,
    /// 사람의 재개 입력 대기
    Paused,
    /// 종료 (종단 상태)
    Stopped,
}

/// 한 틱의 결정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    /// 목표 좌표 클릭
    Click,
    /// 스크롤 에스컬레이션 (1부터 시작하는 단계)
    Scroll { tier: u32 },
    /// 일시정지 진입
    Pause,
    /// 아무것도 하지 않고 다음 틱
    Idle,
}

/// 모니터링 상태 머신
#[derive(Debug)]
pub struct MonitorStateMachine {
    phase: MonitorPhase,
    no_change_count: u32,
    scroll_attempts: u32,
    previous_sample: Option<PixelSample>,
    classifier: ChangeClassifier,
    max_scroll_attempts: u32,
    scroll_after_idle_ticks: u32,
    pause_after_idle_ticks: u32,
}

impl MonitorStateMachine {
    pub fn new(
        classifier: ChangeClassifier,
        max_scroll_attempts: u32,
        monitor: &MonitorConfig,
    ) -> Self {
        Self {
            phase: MonitorPhase::Running,
            no_change_count: 0,
            scroll_attempts: 0,
            previous_sample: None,
            classifier,
            max_scroll_attempts,
            scroll_after_idle_ticks: monitor.scroll_after_idle_ticks,
            pause_after_idle_ticks: monitor.pause_after_idle_ticks,
        }
    }

    pub fn phase(&self) -> MonitorPhase {
        self.phase
    }

    pub fn no_change_count(&self) -> u32 {
        self.no_change_count
    }

    pub fn scroll_attempts(&self) -> u32 {
        self.scroll_attempts
    }

    pub fn previous_sample(&self) -> Option<&PixelSample> {
        self.previous_sample.as_ref()
    }

    /// 새 샘플 처리: 분류 → 샘플 저장 → 결정
    pub fn on_sample(&mut self, sample: PixelSample) -> (ChangeVerdict, TickDecision) {
        let verdict = self
            .classifier
            .classify(&sample, self.previous_sample.as_ref());
        self.previous_sample = Some(sample);
        let decision = self.decide(&verdict);
        (verdict, decision)
    }

    /// 판정 결과로 전이. Running이 아니면 항상 `Idle`.
    pub fn decide(&mut self, verdict: &ChangeVerdict) -> TickDecision {
        if self.phase != MonitorPhase::Running {
            return TickDecision::Idle;
        }

        if self.classifier.is_actionable(verdict) {
            self.no_change_count = 0;
            self.scroll_attempts = 0;
            self.previous_sample = None;
            return TickDecision::Click;
        }

        // 변화가 있어도 다양성 게이트에 막히면 무변화로 센다
        self.no_change_count += 1;
        debug!(
            no_change_count = self.no_change_count,
            unique_colors = verdict.unique_color_count,
            "무변화 틱"
        );

        if self.no_change_count >= self.scroll_after_idle_ticks
            && self.scroll_attempts < self.max_scroll_attempts
        {
            self.scroll_attempts += 1;
            self.no_change_count = 0;
            self.previous_sample = None;
            return TickDecision::Scroll {
                tier: self.scroll_attempts,
            };
        }

        if self.no_change_count >= self.pause_after_idle_ticks
            && self.scroll_attempts >= self.max_scroll_attempts
        {
            self.phase = MonitorPhase::Paused;
            self.no_change_count = 0;
            return TickDecision::Pause;
        }

        TickDecision::Idle
    }

    /// 재개: 카운터와 이전 샘플 초기화 후 Running
    pub fn resume(&mut self) {
        if self.phase == MonitorPhase::Stopped {
            return;
        }
        self.phase = MonitorPhase::Running;
        self.no_change_count = 0;
        self.scroll_attempts = 0;
        self.previous_sample = None;
    }

    /// 종료 (되돌릴 수 없음)
    pub fn stop(&mut self) {
        self.phase = MonitorPhase::Stopped;
    }
}
