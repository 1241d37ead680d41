//! 변화 판정 결과.

/// 한 틱의 변화 판정
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeVerdict {
    /// 유의미한 변화 여부
    pub changed: bool,
    /// 현재 샘플의 고유 색상 수
    pub unique_color_count: usize,
    /// 픽셀 변화율 (0.0 ~ 100.0). 같은 길이의 이전 샘플이 있을 때만 계산.
    pub change_percentage: Option<f64>,
}

impl ChangeVerdict {
    /// 변화 없음 + 단색 영역 (테스트/폴백용)
    pub fn unchanged(unique_color_count: usize) -> Self {
        Self {
            changed: false,
            unique_color_count,
            change_percentage: None,
        }
    }
}
