//! 터미널 재개 게이트.
//!
//! 일시정지 시 안내를 출력하고 한 줄 입력을 기다린다. 빈 줄도 재개로 본다.
//! 입력이 끝나면(EOF) 더 이상 재개할 수 없으므로 `Closed`.
//!
//! 줄 읽기는 전용 OS 스레드에서 돌고 채널로 넘겨받는다. 런타임의 blocking 풀을
//! 쓰지 않으므로 재개 대기 중 종료해도 런타임 종료가 입력을 기다리지 않는다.

use async_trait::async_trait;
use std::io::BufRead;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use autoclick_core::error::CoreError;
use autoclick_core::ports::interaction::{ResumeGate, ResumeSignal};

const PROMPT: &str = "스크롤 한도에 도달했습니다. Enter를 누르면 재개합니다 (Ctrl+C로 종료).";

/// 읽었지만 아직 소비되지 않은 줄 버퍼
const LINE_BUFFER: usize = 16;

/// 줄 단위 입력 기반 재개 게이트
pub struct LineResumeGate {
    lines: Mutex<mpsc::Receiver<std::io::Result<String>>>,
    show_prompt: bool,
}

impl LineResumeGate {
    /// `reader`를 전용 스레드에서 읽기 시작
    pub fn spawn<R: BufRead + Send + 'static>(reader: R) -> Result<Self, CoreError> {
        let (tx, rx) = mpsc::channel(LINE_BUFFER);
        std::thread::Builder::new()
            .name("resume-input".to_string())
            .spawn(move || {
                for line in reader.lines() {
                    let failed = line.is_err();
                    // 게이트가 사라졌으면 종료
                    if tx.blocking_send(line).is_err() || failed {
                        break;
                    }
                }
                debug!("재개 입력 스레드 종료");
            })?;

        Ok(Self {
            lines: Mutex::new(rx),
            show_prompt: true,
        })
    }

    /// 안내 문구 출력 여부
    pub fn with_prompt(mut self, show_prompt: bool) -> Self {
        self.show_prompt = show_prompt;
        self
    }

    /// 표준 입력 게이트. 표준 입력이 터미널일 때만 안내 문구 출력.
    pub fn stdin() -> Result<Self, CoreError> {
        use std::io::IsTerminal;
        let show_prompt = std::io::stdin().is_terminal();
        Ok(Self::spawn(std::io::BufReader::new(std::io::stdin()))?.with_prompt(show_prompt))
    }
}

#[async_trait]
impl ResumeGate for LineResumeGate {
    async fn wait_for_resume(&self) -> Result<ResumeSignal, CoreError> {
        if self.show_prompt {
            println!("\n{PROMPT}");
        }
        let mut lines = self.lines.lock().await;
        match lines.recv().await {
            Some(Ok(_)) => Ok(ResumeSignal::Resume),
            Some(Err(e)) => Err(e.into()),
            None => Ok(ResumeSignal::Closed),
        }
    }
}
