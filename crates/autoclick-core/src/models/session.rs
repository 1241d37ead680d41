//! 모니터링 세션 파라미터와 결과.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::config::MonitorConfig;
use crate::models::region::Coordinates;

/// 잘못된 입력 시 사용하는 틱 간격 (초)
pub const DEFAULT_CHECK_INTERVAL_SECS: f64 = 2.0;

/// 잘못된 입력 시 사용하는 최대 스크롤 시도 횟수
pub const DEFAULT_MAX_SCROLL_ATTEMPTS: u32 = 5;

/// 한 세션 동안 고정되는 파라미터
#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    /// 목표 좌표
    pub target: Coordinates,
    /// 틱 간격
    pub check_interval: Duration,
    /// 일시정지 전 최대 스크롤 시도 횟수
    pub max_scroll_attempts: u32,
}

impl SessionParams {
    /// 설정값 그대로 사용
    pub fn from_config(target: Coordinates, monitor: &MonitorConfig) -> Self {
        Self {
            target,
            check_interval: Duration::from_millis(monitor.check_interval_ms),
            max_scroll_attempts: monitor.max_scroll_attempts,
        }
    }

    /// 사용자 입력 문자열로 파라미터 결정.
    ///
    /// 입력이 없으면 설정값, 파싱 불가/0 이하이면 문서화된 기본값
    /// (2초, 5회)으로 대체한다. 에러는 올리지 않는다.
    pub fn from_user_input(
        target: Coordinates,
        interval_input: Option<&str>,
        max_scroll_input: Option<&str>,
        monitor: &MonitorConfig,
    ) -> Self {
        let mut params = Self::from_config(target, monitor);

        if let Some(raw) = interval_input.map(str::trim).filter(|s| !s.is_empty()) {
            params.check_interval = parse_interval(raw).unwrap_or_else(|| {
                warn!(
                    input = raw,
                    "잘못된 검사 간격, 기본값 {DEFAULT_CHECK_INTERVAL_SECS}초 사용"
                );
                Duration::from_secs_f64(DEFAULT_CHECK_INTERVAL_SECS)
            });
        }

        if let Some(raw) = max_scroll_input.map(str::trim).filter(|s| !s.is_empty()) {
            params.max_scroll_attempts = raw.parse::<u32>().unwrap_or_else(|_| {
                warn!(
                    input = raw,
                    "잘못된 최대 스크롤 횟수, 기본값 {DEFAULT_MAX_SCROLL_ATTEMPTS}회 사용"
                );
                DEFAULT_MAX_SCROLL_ATTEMPTS
            });
        }

        params
    }
}

fn parse_interval(raw: &str) -> Option<Duration> {
    let secs = raw.parse::<f64>().ok()?;
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}

/// 세션 종료 시 보고되는 집계
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// 수행한 클릭 수
    pub click_count: u64,
    /// 수행한 스크롤 에스컬레이션 수
    pub scroll_count: u64,
    /// 일시정지 진입 횟수
    pub pause_count: u64,
    /// 캡처 실패 틱 수
    pub capture_failures: u64,
    /// 입력 실행 실패 수
    pub actuation_failures: u64,
    /// 판정까지 진행된 틱 수
    pub ticks: u64,
    /// 세션 시작 시각
    pub started_at: DateTime<Utc>,
    /// 세션 종료 시각
    pub ended_at: Option<DateTime<Utc>>,
}

impl SessionReport {
    pub fn start() -> Self {
        Self {
            click_count: 0,
            scroll_count: 0,
            pause_count: 0,
            capture_failures: 0,
            actuation_failures: 0,
            ticks: 0,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    pub fn finish(&mut self) {
        self.ended_at = Some(Utc::now());
    }
}
