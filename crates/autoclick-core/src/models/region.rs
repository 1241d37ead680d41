//! 화면 좌표와 감시 영역.

use serde::{Deserialize, Serialize};

/// 화면 좌표 (목표 지점)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 화면 안쪽으로 클램프 (`0..=width-1`, `0..=height-1`)
    pub fn clamp_to(self, screen: ScreenSize) -> Self {
        let max_x = (screen.width as i64 - 1).max(0) as i32;
        let max_y = (screen.height as i64 - 1).max(0) as i32;
        Self {
            x: self.x.clamp(0, max_x),
            y: self.y.clamp(0, max_y),
        }
    }

    /// 오프셋 적용
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 물리 화면 크기
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// 감시 영역 (화면 좌표계의 사각형)
///
/// 세션 시작 시 목표 좌표 중심으로 한 번 만들어지고 이후 변하지 않는다.
/// 원점은 화면 밖일 수 있으며, 캡처 시점에 [`ScreenRegion::clamp_to`]로 잘린다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRegion {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRegion {
    pub fn new(origin_x: i32, origin_y: i32, width: u32, height: u32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// 목표 좌표 중심의 `size × size` 정사각형
    pub fn centered_on(target: Coordinates, size: u32) -> Self {
        let half = (size / 2) as i32;
        Self::new(
            target.x.saturating_sub(half),
            target.y.saturating_sub(half),
            size,
            size,
        )
    }

    /// 픽셀 수
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// 화면(또는 프레임) 경계와의 교집합. 겹치지 않으면 `None`.
    pub fn clamp_to(&self, bounds: ScreenSize) -> Option<ScreenRegion> {
        let x1 = i64::from(self.origin_x).max(0);
        let y1 = i64::from(self.origin_y).max(0);
        let x2 = (i64::from(self.origin_x) + i64::from(self.width)).min(i64::from(bounds.width));
        let y2 = (i64::from(self.origin_y) + i64::from(self.height)).min(i64::from(bounds.height));

        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        Some(ScreenRegion {
            origin_x: x1 as i32,
            origin_y: y1 as i32,
            width: (x2 - x1) as u32,
            height: (y2 - y1) as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_region_is_50_by_50() {
        let region = ScreenRegion::centered_on(Coordinates::new(100, 200), 50);
        assert_eq!(region, ScreenRegion::new(75, 175, 50, 50));
        assert_eq!(region.pixel_count(), 2_500);
    }

    #[test]
    fn clamp_inside_screen_is_identity() {
        let region = ScreenRegion::new(75, 175, 50, 50);
        assert_eq!(region.clamp_to(ScreenSize::new(1920, 1080)), Some(region));
    }

    #[test]
    fn clamp_at_top_left_corner() {
        let region = ScreenRegion::centered_on(Coordinates::new(10, 5), 50);
        let clamped = region.clamp_to(ScreenSize::new(1920, 1080)).unwrap();
        assert_eq!(clamped, ScreenRegion::new(0, 0, 35, 30));
    }

    #[test]
    fn clamp_at_bottom_right_corner() {
        let region = ScreenRegion::centered_on(Coordinates::new(1915, 1075), 50);
        let clamped = region.clamp_to(ScreenSize::new(1920, 1080)).unwrap();
        assert_eq!(clamped, ScreenRegion::new(1890, 1050, 30, 30));
    }

    #[test]
    fn clamp_off_screen_is_none() {
        let region = ScreenRegion::new(-100, -100, 50, 50);
        assert!(region.clamp_to(ScreenSize::new(1920, 1080)).is_none());
    }

    #[test]
    fn coordinates_clamp_to_screen() {
        let screen = ScreenSize::new(800, 600);
        assert_eq!(Coordinates::new(-5, 700).clamp_to(screen), Coordinates::new(0, 599));
        assert_eq!(Coordinates::new(400, 300).clamp_to(screen), Coordinates::new(400, 300));
    }
}
