//! autoclick 진입점.
//!
//! 설정/좌표 기록 로드, 어댑터 와이어링, 종료 시그널 연결 후 명령을 실행한다.

mod cli;
mod lifecycle;
mod resume_gate;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use autoclick_automation::input_driver::{create_platform_input_driver, NoOpInputDriver};
use autoclick_automation::scroll::ScrollEscalator;
use autoclick_automation::session::MonitorSession;
use autoclick_core::config::AppConfig;
use autoclick_core::config_manager::ConfigManager;
use autoclick_core::coordinate_store::{CoordinateStore, COORDINATE_FILE_NAME};
use autoclick_core::models::region::Coordinates;
use autoclick_core::models::session::SessionParams;
use autoclick_core::ports::input_driver::InputDriver;
use autoclick_core::ports::vision::ScreenCapture;
use autoclick_vision::capture::create_platform_capture;

use crate::cli::{Args, Command, RunArgs};
use crate::lifecycle::LifecycleManager;
use crate::resume_gate::LineResumeGate;

/// `scroll-test` 단계 사이 대기
const SCROLL_TEST_PAUSE: Duration = Duration::from_secs(1);

/// 설정 로드. 실패하면 기본값으로 계속.
fn load_config(args: &Args) -> AppConfig {
    let manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    match manager {
        Ok(manager) => {
            info!("설정 파일: {}", manager.config_path().display());
            manager.get()
        }
        Err(e) => {
            warn!("설정 로드 실패, 기본값 사용: {e}");
            AppConfig::default_config()
        }
    }
}

/// 좌표 기록 저장소. 경로를 정할 수 없으면 기록 없이 계속.
fn coordinate_store(args: &Args) -> Option<CoordinateStore> {
    let path = match &args.state_file {
        Some(path) => path.clone(),
        None => match ConfigManager::config_dir() {
            Ok(dir) => dir.join(COORDINATE_FILE_NAME),
            Err(e) => {
                warn!("좌표 기록 경로 없음, 저장하지 않음: {e}");
                return None;
            }
        },
    };
    Some(CoordinateStore::new(path))
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!(seed, "고정 시드 사용");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    }
}

fn make_driver(run: &RunArgs) -> Arc<dyn InputDriver> {
    if run.dry_run {
        info!("드라이런: 입력은 로그로만 출력");
        Arc::new(NoOpInputDriver::new())
    } else {
        Arc::from(create_platform_input_driver())
    }
}

/// 좌표 저장. 실패해도 종료 흐름은 막지 않는다.
fn persist_target(store: Option<&CoordinateStore>, target: Coordinates) {
    let Some(store) = store else {
        return;
    };
    if let Err(e) = store.save(target) {
        warn!("좌표 저장 실패: {e}");
    }
}

/// `scroll-test` 실행. 단계가 실패해도 좌표는 저장하고 실행한 단계 수 대신 `None`.
async fn run_scroll_test(
    escalator: &ScrollEscalator,
    target: Coordinates,
    rng: &mut StdRng,
    shutdown: &mut watch::Receiver<bool>,
    store: Option<&CoordinateStore>,
) -> Option<u32> {
    let swept = escalator
        .sweep_tiers(target, SCROLL_TEST_PAUSE, rng, shutdown)
        .await;
    persist_target(store, target);
    match swept {
        Ok(executed) => Some(executed),
        Err(e) => {
            warn!("스크롤 테스트 중단: {e}");
            None
        }
    }
}

/// 종료 시그널 감시 태스크
fn spawn_signal_task(lifecycle: &Arc<LifecycleManager>) -> tokio::task::JoinHandle<()> {
    let lifecycle = lifecycle.clone();
    tokio::spawn(async move {
        if let Err(e) = lifecycle.wait_for_signal().await {
            warn!("시그널 핸들러 등록 실패: {e}");
        }
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = cli::log_filter(&args.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    let config = load_config(&args);
    let store = coordinate_store(&args);
    let stored = store.as_ref().and_then(CoordinateStore::load);
    if let Some(stored) = stored {
        info!("저장된 좌표: {stored}");
    }

    let lifecycle = Arc::new(LifecycleManager::new());
    let signal_task = spawn_signal_task(&lifecycle);

    match &args.command {
        Command::Monitor {
            target,
            interval,
            max_scroll_attempts,
            run,
        } => {
            let target = target.resolve(stored)?;
            let params = SessionParams::from_user_input(
                target,
                interval.as_deref(),
                max_scroll_attempts.as_deref(),
                &config.monitor,
            );

            let capture: Arc<dyn ScreenCapture> = Arc::from(create_platform_capture());
            let session = MonitorSession::new(
                params,
                &config,
                capture,
                make_driver(run),
                Arc::new(LineResumeGate::stdin()?),
                make_rng(run.seed),
            );
            info!("감시 영역: {:?}", session.region());
            println!("{target} 감시 시작 (Ctrl+C로 종료)");

            let report = session.run(lifecycle.subscribe()).await;
            persist_target(store.as_ref(), target);
            println!("\n모니터링 종료. 총 클릭 횟수: {}", report.click_count);
        }
        Command::ScrollTest { target, run } => {
            let target = target.resolve(stored)?;
            let escalator = ScrollEscalator::new(make_driver(run), config.actuation.clone());
            let mut rng = make_rng(run.seed);
            let mut shutdown = lifecycle.subscribe();

            println!("{target}에서 스크롤 1~4단계 테스트");
            if let Some(executed) =
                run_scroll_test(&escalator, target, &mut rng, &mut shutdown, store.as_ref()).await
            {
                println!("스크롤 테스트 완료 ({executed}/4단계)");
            }
        }
    }

    signal_task.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use autoclick_core::error::CoreError;
    use autoclick_core::models::gesture::ScrollDelta;
    use autoclick_core::models::region::ScreenSize;
    use tempfile::TempDir;

    /// 화면 크기 조회부터 실패하는 드라이버
    struct BrokenDriver;

    #[async_trait]
    impl InputDriver for BrokenDriver {
        async fn move_pointer(&self, _x: i32, _y: i32, _duration: Duration) -> Result<(), CoreError> {
            Err(CoreError::Actuation("이동 거부".into()))
        }

        async fn pointer_position(&self) -> Result<Coordinates, CoreError> {
            Err(CoreError::Actuation("위치 거부".into()))
        }

        async fn click(&self, _x: i32, _y: i32) -> Result<(), CoreError> {
            Err(CoreError::Actuation("클릭 거부".into()))
        }

        async fn scroll(&self, _delta: ScrollDelta) -> Result<(), CoreError> {
            Err(CoreError::Actuation("스크롤 거부".into()))
        }

        async fn screen_size(&self) -> Result<ScreenSize, CoreError> {
            Err(CoreError::Actuation("화면 없음".into()))
        }

        fn platform(&self) -> &str {
            "broken"
        }
    }

    fn args_with_state_file(path: &std::path::Path) -> Args {
        Args::try_parse_from([
            "autoclick",
            "--state-file",
            path.to_str().unwrap(),
            "scroll-test",
        ])
        .unwrap()
    }

    #[test]
    fn state_file_argument_selects_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("coords.json");
        let store = coordinate_store(&args_with_state_file(&path)).unwrap();
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn persisting_without_store_is_skipped() {
        persist_target(None, Coordinates::new(1, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_scroll_test_still_saves_target() {
        let temp_dir = TempDir::new().unwrap();
        let store = CoordinateStore::new(temp_dir.path().join(COORDINATE_FILE_NAME));
        let escalator = ScrollEscalator::new(
            Arc::new(BrokenDriver),
            AppConfig::default_config().actuation,
        );
        let (_tx, mut shutdown) = watch::channel(false);
        let mut rng = StdRng::seed_from_u64(1);
        let target = Coordinates::new(320, 240);

        let executed =
            run_scroll_test(&escalator, target, &mut rng, &mut shutdown, Some(&store)).await;

        assert_eq!(executed, None);
        assert_eq!(store.load(), Some(target));
    }

    #[tokio::test(start_paused = true)]
    async fn scroll_test_runs_all_tiers_and_saves_target() {
        let temp_dir = TempDir::new().unwrap();
        let store = CoordinateStore::new(temp_dir.path().join(COORDINATE_FILE_NAME));
        let escalator = ScrollEscalator::new(
            Arc::new(NoOpInputDriver::new()),
            AppConfig::default_config().actuation,
        );
        let (_tx, mut shutdown) = watch::channel(false);
        let mut rng = StdRng::seed_from_u64(2);
        let target = Coordinates::new(10, 20);

        let executed =
            run_scroll_test(&escalator, target, &mut rng, &mut shutdown, Some(&store)).await;

        assert_eq!(executed, Some(4));
        assert_eq!(store.load(), Some(target));
    }
}
