//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 플랫폼 어댑터(xcap, enigo, stdin)가 이 trait들을 구현하며,
//! `autoclick-app`에서 `Arc<dyn T>`로 와이어링한다.

pub mod input_driver;
pub mod interaction;
pub mod vision;
