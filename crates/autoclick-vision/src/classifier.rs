//! 변화 분류기.
//!
//! 픽셀 일치 여부만 보는 비교는 안티앨리어싱/영상 노이즈에 취약하다.
//! 상대 변화율과 절대 색상 다양성을 함께 보고 판정한다.
//!
//! 1. 이전 샘플 없음 → 고유 색상 수 > 20
//! 2. 길이가 다름(영역 클램프 변화) → 고유 색상 수 > 15
//! 3. 그 외 → 픽셀 변화율 > 10%
//!
//! 별도로 고유 색상 수 > 30 이면 "실제 UI 요소"로 보고 클릭을 허용한다.

use autoclick_core::config::DetectionConfig;
use autoclick_core::models::sample::PixelSample;
use autoclick_core::models::verdict::ChangeVerdict;
use tracing::debug;

/// 같은 길이 두 샘플의 픽셀 변화율 (0.0 ~ 100.0).
///
/// 길이가 다르면 `None`, 빈 샘플은 0.0.
pub fn change_percentage(current: &PixelSample, previous: &PixelSample) -> Option<f64> {
    let mismatches = current.mismatches(previous)?;
    if current.is_empty() {
        return Some(0.0);
    }
    Some(mismatches as f64 / current.len() as f64 * 100.0)
}

/// 변화 분류기
#[derive(Debug, Clone, Default)]
pub struct ChangeClassifier {
    thresholds: DetectionConfig,
}

impl ChangeClassifier {
    pub fn new(thresholds: DetectionConfig) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &DetectionConfig {
        &self.thresholds
    }

    /// 현재 샘플을 이전 샘플과 비교해 판정
    pub fn classify(&self, current: &PixelSample, previous: Option<&PixelSample>) -> ChangeVerdict {
        let unique_color_count = current.unique_color_count();

        let verdict = match previous {
            None => ChangeVerdict {
                changed: unique_color_count > self.thresholds.first_tick_diversity_threshold,
                unique_color_count,
                change_percentage: None,
            },
            Some(previous) => match change_percentage(current, previous) {
                None => ChangeVerdict {
                    changed: unique_color_count > self.thresholds.resized_diversity_threshold,
                    unique_color_count,
                    change_percentage: None,
                },
                Some(percentage) => ChangeVerdict {
                    changed: percentage > self.thresholds.change_percentage_threshold,
                    unique_color_count,
                    change_percentage: Some(percentage),
                },
            },
        };

        if let Some(percentage) = verdict.change_percentage {
            debug!(
                changed = verdict.changed,
                unique_colors = unique_color_count,
                "픽셀 변화율: {percentage:.2}%"
            );
        } else {
            debug!(
                changed = verdict.changed,
                unique_colors = unique_color_count,
                "색상 다양성 판정"
            );
        }

        verdict
    }

    /// 다양성 게이트: 실제 UI 요소처럼 보이는지
    pub fn is_interactive(&self, verdict: &ChangeVerdict) -> bool {
        verdict.unique_color_count > self.thresholds.interactive_diversity_threshold
    }

    /// 클릭할 만한 변화인지 (변화 + 다양성 게이트)
    pub fn is_actionable(&self, verdict: &ChangeVerdict) -> bool {
        verdict.changed && self.is_interactive(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 고유 색상이 정확히 `colors`개인 길이 `len` 샘플
    fn sample_with_colors(colors: u32, len: usize) -> PixelSample {
        PixelSample::new((0..len).map(|i| i as u32 % colors).collect())
    }

    #[test]
    fn first_tick_threshold_boundary() {
        let classifier = ChangeClassifier::default();

        let at_threshold = classifier.classify(&sample_with_colors(20, 2_500), None);
        assert!(!at_threshold.changed);
        assert_eq!(at_threshold.unique_color_count, 20);
        assert_eq!(at_threshold.change_percentage, None);

        let above = classifier.classify(&sample_with_colors(21, 2_500), None);
        assert!(above.changed);
    }

    #[test]
    fn resized_sample_uses_lower_threshold() {
        let classifier = ChangeClassifier::default();
        let previous = sample_with_colors(16, 2_500);

        let verdict = classifier.classify(&sample_with_colors(16, 1_500), Some(&previous));
        assert!(verdict.changed);
        assert_eq!(verdict.change_percentage, None);

        let verdict = classifier.classify(&sample_with_colors(15, 1_500), Some(&previous));
        assert!(!verdict.changed);
    }

    #[test]
    fn change_percentage_matches_mismatch_ratio() {
        let previous = PixelSample::new(vec![0; 200]);
        let mut pixels = vec![0; 200];
        for px in pixels.iter_mut().take(23) {
            *px = 1;
        }
        let current = PixelSample::new(pixels);

        let percentage = change_percentage(&current, &previous).unwrap();
        assert!((percentage - 11.5).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&percentage));
    }

    #[test]
    fn change_percentage_bounds() {
        let a = sample_with_colors(50, 100);
        let b = PixelSample::new(a.pixels().iter().map(|p| p + 1_000).collect());
        assert_eq!(change_percentage(&a, &a), Some(0.0));
        assert_eq!(change_percentage(&a, &b), Some(100.0));
        assert_eq!(
            change_percentage(&PixelSample::new(vec![]), &PixelSample::new(vec![])),
            Some(0.0)
        );
    }

    #[test]
    fn ten_percent_is_not_a_change() {
        let classifier = ChangeClassifier::default();
        let previous = PixelSample::new(vec![0; 100]);
        let mut pixels = vec![0; 100];
        for px in pixels.iter_mut().take(10) {
            *px = 7;
        }

        let verdict = classifier.classify(&PixelSample::new(pixels.clone()), Some(&previous));
        assert!(!verdict.changed);
        assert_eq!(verdict.change_percentage, Some(10.0));

        pixels[10] = 7;
        let verdict = classifier.classify(&PixelSample::new(pixels), Some(&previous));
        assert!(verdict.changed);
    }

    #[test]
    fn diversity_gate_requires_more_than_thirty_colors() {
        let classifier = ChangeClassifier::default();

        let noisy = classifier.classify(&sample_with_colors(25, 2_500), None);
        assert!(noisy.changed);
        assert!(!classifier.is_interactive(&noisy));
        assert!(!classifier.is_actionable(&noisy));

        let button = classifier.classify(&sample_with_colors(31, 2_500), None);
        assert!(classifier.is_actionable(&button));
    }

    #[test]
    fn thresholds_are_configurable() {
        let classifier = ChangeClassifier::new(DetectionConfig {
            first_tick_diversity_threshold: 2,
            resized_diversity_threshold: 1,
            change_percentage_threshold: 50.0,
            interactive_diversity_threshold: 3,
        });

        let verdict = classifier.classify(&sample_with_colors(4, 16), None);
        assert!(verdict.changed);
        assert!(classifier.is_actionable(&verdict));
    }
}
