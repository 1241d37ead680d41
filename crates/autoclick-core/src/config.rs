//! 애플리케이션 설정 구조체.
//!
//! 모니터링 주기, 변화 감지 임계값, 입력 타이밍 등 런타임 설정을 정의한다.
//! 임계값은 경험적으로 조정된 값이라 전부 설정으로 노출한다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 모니터링 루프 설정
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// 변화 감지(분류기) 임계값
    #[serde(default)]
    pub detection: DetectionConfig,
    /// 클릭/스크롤 타이밍
    #[serde(default)]
    pub actuation: ActuationConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self::default()
    }

    /// 틱 간격
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.monitor.check_interval_ms)
    }

    /// 루프가 돌 수 없는 값 검사
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.monitor.check_interval_ms == 0 {
            return Err(CoreError::Validation {
                field: "monitor.check_interval_ms".to_string(),
                message: "0보다 커야 합니다".to_string(),
            });
        }
        if self.monitor.region_size == 0 {
            return Err(CoreError::Validation {
                field: "monitor.region_size".to_string(),
                message: "0보다 커야 합니다".to_string(),
            });
        }
        if !self.detection.change_percentage_threshold.is_finite() {
            return Err(CoreError::Validation {
                field: "detection.change_percentage_threshold".to_string(),
                message: "유한한 값이어야 합니다".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================
// 모니터링 설정
// ============================================================

/// 모니터링 루프 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// 틱 간격 (밀리초)
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,
    /// 일시정지 전 최대 스크롤 시도 횟수
    #[serde(default = "default_max_scroll_attempts")]
    pub max_scroll_attempts: u32,
    /// 감시 영역 한 변 길이 (픽셀, 목표 좌표 중심)
    #[serde(default = "default_region_size")]
    pub region_size: u32,
    /// 스크롤 시도 전 연속 무변화 틱 수
    #[serde(default = "default_scroll_after_idle_ticks")]
    pub scroll_after_idle_ticks: u32,
    /// 스크롤 한도 소진 후 일시정지까지의 연속 무변화 틱 수
    #[serde(default = "default_pause_after_idle_ticks")]
    pub pause_after_idle_ticks: u32,
    /// 스크롤 후 안정화 대기 기본값 (밀리초)
    #[serde(default = "default_scroll_settle_base_ms")]
    pub scroll_settle_base_ms: u64,
    /// 스크롤 시도 1회당 추가 안정화 대기 (밀리초)
    #[serde(default = "default_scroll_settle_step_ms")]
    pub scroll_settle_step_ms: u64,
}

fn default_check_interval_ms() -> u64 {
    2_000
}
fn default_max_scroll_attempts() -> u32 {
    5
}
fn default_region_size() -> u32 {
    50
}
fn default_scroll_after_idle_ticks() -> u32 {
    5
}
fn default_pause_after_idle_ticks() -> u32 {
    10
}
fn default_scroll_settle_base_ms() -> u64 {
    1_000
}
fn default_scroll_settle_step_ms() -> u64 {
    300
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_ms: default_check_interval_ms(),
            max_scroll_attempts: default_max_scroll_attempts(),
            region_size: default_region_size(),
            scroll_after_idle_ticks: default_scroll_after_idle_ticks(),
            pause_after_idle_ticks: default_pause_after_idle_ticks(),
            scroll_settle_base_ms: default_scroll_settle_base_ms(),
            scroll_settle_step_ms: default_scroll_settle_step_ms(),
        }
    }
}

impl MonitorConfig {
    /// 스크롤 시도 횟수에 비례하는 안정화 대기 시간
    ///
    /// `base + step * scroll_attempts` (기본 1.0s + 0.3s × n)
    pub fn scroll_settle(&self, scroll_attempts: u32) -> Duration {
        Duration::from_millis(
            self.scroll_settle_step_ms
                .saturating_mul(u64::from(scroll_attempts))
                .saturating_add(self.scroll_settle_base_ms),
        )
    }
}

// ============================================================
// 변화 감지 설정
// ============================================================

/// 변화 감지 임계값
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// 이전 샘플이 없을 때 "변화"로 볼 고유 색상 수 (초과)
    #[serde(default = "default_first_tick_diversity_threshold")]
    pub first_tick_diversity_threshold: usize,
    /// 샘플 길이가 달라졌을 때 "변화"로 볼 고유 색상 수 (초과)
    #[serde(default = "default_resized_diversity_threshold")]
    pub resized_diversity_threshold: usize,
    /// 픽셀 변화율 임계값 (퍼센트, 초과)
    #[serde(default = "default_change_percentage_threshold")]
    pub change_percentage_threshold: f64,
    /// 클릭 대상(실제 UI 요소)으로 볼 고유 색상 수 (초과)
    #[serde(default = "default_interactive_diversity_threshold")]
    pub interactive_diversity_threshold: usize,
}

fn default_first_tick_diversity_threshold() -> usize {
    20
}
fn default_resized_diversity_threshold() -> usize {
    15
}
fn default_change_percentage_threshold() -> f64 {
    10.0
}
fn default_interactive_diversity_threshold() -> usize {
    30
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            first_tick_diversity_threshold: default_first_tick_diversity_threshold(),
            resized_diversity_threshold: default_resized_diversity_threshold(),
            change_percentage_threshold: default_change_percentage_threshold(),
            interactive_diversity_threshold: default_interactive_diversity_threshold(),
        }
    }
}

// ============================================================
// 입력 타이밍 설정
// ============================================================

/// 클릭/스크롤 제스처 타이밍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActuationConfig {
    /// 클릭 전 포인터 이동 시간 (밀리초)
    #[serde(default = "default_click_move_ms")]
    pub click_move_ms: u64,
    /// 이동 후 클릭 전 대기 (밀리초)
    #[serde(default = "default_click_pre_delay_ms")]
    pub click_pre_delay_ms: u64,
    /// 클릭 후 안정화 대기 최소값 (밀리초)
    #[serde(default = "default_click_settle_min_ms")]
    pub click_settle_min_ms: u64,
    /// 클릭 후 안정화 대기 최대값 (밀리초)
    #[serde(default = "default_click_settle_max_ms")]
    pub click_settle_max_ms: u64,
    /// 스크롤 제스처 위치 흔들림 (±픽셀)
    #[serde(default = "default_scroll_jitter_px")]
    pub scroll_jitter_px: i32,
    /// 스크롤 제스처 포인터 이동 시간 (밀리초)
    #[serde(default = "default_gesture_move_ms")]
    pub gesture_move_ms: u64,
    /// 이동 후 스크롤 전 대기 (밀리초)
    #[serde(default = "default_gesture_pre_scroll_ms")]
    pub gesture_pre_scroll_ms: u64,
    /// 스크롤 후 포인터 복귀 전 대기 (밀리초)
    #[serde(default = "default_gesture_post_scroll_ms")]
    pub gesture_post_scroll_ms: u64,
}

fn default_click_move_ms() -> u64 {
    100
}
fn default_click_pre_delay_ms() -> u64 {
    50
}
fn default_click_settle_min_ms() -> u64 {
    2_500
}
fn default_click_settle_max_ms() -> u64 {
    4_000
}
fn default_scroll_jitter_px() -> i32 {
    20
}
fn default_gesture_move_ms() -> u64 {
    200
}
fn default_gesture_pre_scroll_ms() -> u64 {
    100
}
fn default_gesture_post_scroll_ms() -> u64 {
    200
}

impl Default for ActuationConfig {
    fn default() -> Self {
        Self {
            click_move_ms: default_click_move_ms(),
            click_pre_delay_ms: default_click_pre_delay_ms(),
            click_settle_min_ms: default_click_settle_min_ms(),
            click_settle_max_ms: default_click_settle_max_ms(),
            scroll_jitter_px: default_scroll_jitter_px(),
            gesture_move_ms: default_gesture_move_ms(),
            gesture_pre_scroll_ms: default_gesture_pre_scroll_ms(),
            gesture_post_scroll_ms: default_gesture_post_scroll_ms(),
        }
    }
}
