//! autoclick 도메인 모델.
//!
//! 캡처 영역, 픽셀 샘플, 변화 판정, 스크롤 제스처, 세션 파라미터/결과.

pub mod gesture;
pub mod region;
pub mod sample;
pub mod session;
pub mod verdict;
