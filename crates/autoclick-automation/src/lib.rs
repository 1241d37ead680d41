//! # autoclick-automation
//!
//! 자동 클릭 모니터의 실행 크레이트.
//! 변화 판정 결과로 클릭/스크롤/일시정지를 결정하는 상태 머신과,
//! 그 결정을 입력 드라이버로 실행하는 세션 러너를 담당한다.

pub mod click;
pub mod input_driver;
pub mod scroll;
pub mod session;
pub mod state_machine;
