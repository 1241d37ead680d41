//! 명령줄 인자.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use autoclick_core::models::region::Coordinates;

/// autoclick: 화면 한 지점을 감시하다 변화가 생기면 클릭
///
/// 변화가 없으면 점점 강하게 스크롤하고, 그래도 없으면 사람의 재개 입력을 기다린다.
#[derive(Parser, Debug)]
#[command(name = "autoclick")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 마지막 좌표 기록 파일 경로 (기본: 설정 디렉토리의 coordinates.json)
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 좌표 주변을 감시하며 자동 클릭
    Monitor {
        #[command(flatten)]
        target: TargetArgs,

        /// 틱 간격 (초, 소수 허용). 잘못된 값이면 2초
        #[arg(long, allow_hyphen_values = true)]
        interval: Option<String>,

        /// 일시정지 전 최대 스크롤 시도 횟수. 잘못된 값이면 5회
        #[arg(long, allow_hyphen_values = true)]
        max_scroll_attempts: Option<String>,

        #[command(flatten)]
        run: RunArgs,
    },
    /// 좌표에서 스크롤 1~4단계를 한 번씩 실행
    ScrollTest {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        run: RunArgs,
    },
}

/// 목표 좌표. 생략하면 마지막으로 저장된 좌표 사용
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TargetArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<i32>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// 난수 시드 (지정 시 제스처/대기 시간 재현 가능)
    #[arg(long)]
    pub seed: Option<u64>,

    /// 실제 입력 없이 로그만 출력
    #[arg(long)]
    pub dry_run: bool,
}

impl TargetArgs {
    /// 인자와 저장된 좌표를 합쳐 목표 좌표 결정. 축별로 인자가 우선.
    pub fn resolve(&self, stored: Option<Coordinates>) -> Result<Coordinates> {
        match (self.x, self.y, stored) {
            (Some(x), Some(y), _) => Ok(Coordinates::new(x, y)),
            (x, y, Some(stored)) => Ok(Coordinates::new(
                x.unwrap_or(stored.x),
                y.unwrap_or(stored.y),
            )),
            (_, _, None) => bail!("목표 좌표가 없습니다: --x/--y를 지정하세요 (저장된 좌표 없음)"),
        }
    }
}

/// 크레이트별 로그 필터
pub fn log_filter(level: &str) -> String {
    ["autoclick", "autoclick_app", "autoclick_core", "autoclick_vision", "autoclick_automation"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
