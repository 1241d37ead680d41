//! # autoclick-core
//!
//! autoclick 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 영역, 픽셀 샘플, 변화 판정, 세션 파라미터
//! - [`ports`]: 플랫폼 포트 인터페이스 (캡처, 입력, 재개 게이트)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)
//! - [`coordinate_store`]: 마지막 좌표 기록 (last_x / last_y)

pub mod config;
pub mod config_manager;
pub mod coordinate_store;
pub mod error;
pub mod models;
pub mod ports;
