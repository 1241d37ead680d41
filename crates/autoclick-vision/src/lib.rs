//! # autoclick-vision
//!
//! 감시 영역 캡처와 변화 판정.
//! 영역 캡처(1차) → 전체 화면 캡처 + 자르기(폴백)로 샘플을 만들고,
//! 이전 샘플과 비교해 "유의미한 변화"와 "클릭 대상다움"을 판정한다.

pub mod capture;
pub mod classifier;
pub mod sampler;
