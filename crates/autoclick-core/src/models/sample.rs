//! 픽셀 프레임과 샘플.
//!
//! 픽셀 값은 `0xRRGGBB`로 패킹한 `u32`. 알파 채널은 버린다.

use std::collections::HashSet;

use crate::models::region::{ScreenRegion, ScreenSize};

/// RGB → `0xRRGGBB`
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// 캡처 포트가 반환하는 래스터 프레임
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFrame {
    pub width: u32,
    pub height: u32,
    /// 행 우선(raster) 순서, 길이 = width × height
    pub pixels: Vec<u32>,
}

impl PixelFrame {
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// RGBA 바이트 버퍼에서 생성
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Self {
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| pack_rgb(px[0], px[1], px[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn size(&self) -> ScreenSize {
        ScreenSize::new(self.width, self.height)
    }

    /// 프레임 좌표계의 영역을 잘라낸다. 영역은 프레임 경계로 클램프된다.
    pub fn crop(&self, region: &ScreenRegion) -> Option<PixelSample> {
        let clamped = region.clamp_to(self.size())?;
        let stride = self.width as usize;
        let x0 = clamped.origin_x as usize;
        let y0 = clamped.origin_y as usize;
        let w = clamped.width as usize;

        let mut pixels = Vec::with_capacity(clamped.pixel_count());
        for row in y0..y0 + clamped.height as usize {
            let start = row * stride + x0;
            pixels.extend_from_slice(&self.pixels[start..start + w]);
        }
        Some(PixelSample::new(pixels))
    }

    pub fn into_sample(self) -> PixelSample {
        PixelSample::new(self.pixels)
    }
}

/// 한 시점의 감시 영역 픽셀 (틱마다 새로 만들고 한 번 비교 후 버린다)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSample {
    pixels: Vec<u32>,
}

impl PixelSample {
    pub fn new(pixels: Vec<u32>) -> Self {
        Self { pixels }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// 고유 색상 수
    pub fn unique_color_count(&self) -> usize {
        self.pixels.iter().collect::<HashSet<_>>().len()
    }

    /// 같은 인덱스에서 값이 다른 픽셀 수. 길이가 다르면 `None`.
    pub fn mismatches(&self, other: &PixelSample) -> Option<usize> {
        if self.len() != other.len() {
            return None;
        }
        Some(
            self.pixels
                .iter()
                .zip(other.pixels.iter())
                .filter(|(a, b)| a != b)
                .count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(width: u32, height: u32) -> PixelFrame {
        let pixels = (0..width * height).collect();
        PixelFrame::new(width, height, pixels)
    }

    #[test]
    fn pack_rgb_layout() {
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x123456);
    }

    #[test]
    fn from_rgba_drops_alpha() {
        let frame = PixelFrame::from_rgba(2, 1, &[1, 2, 3, 255, 1, 2, 3, 0]);
        assert_eq!(frame.pixels, vec![0x010203, 0x010203]);
    }

    #[test]
    fn crop_inner_region() {
        let frame = gradient_frame(4, 4);
        let sample = frame.crop(&ScreenRegion::new(1, 1, 2, 2)).unwrap();
        assert_eq!(sample.pixels(), &[5, 6, 9, 10]);
    }

    #[test]
    fn crop_is_clamped_to_frame() {
        let frame = gradient_frame(4, 4);
        let sample = frame.crop(&ScreenRegion::new(-1, 2, 3, 5)).unwrap();
        // 교집합: x 0..2, y 2..4
        assert_eq!(sample.pixels(), &[8, 9, 12, 13]);
    }

    #[test]
    fn crop_outside_frame_is_none() {
        let frame = gradient_frame(4, 4);
        assert!(frame.crop(&ScreenRegion::new(10, 10, 2, 2)).is_none());
    }

    #[test]
    fn unique_colors_and_mismatches() {
        let a = PixelSample::new(vec![1, 1, 2, 3]);
        let b = PixelSample::new(vec![1, 2, 2, 4]);
        assert_eq!(a.unique_color_count(), 3);
        assert_eq!(a.mismatches(&b), Some(2));
        assert_eq!(a.mismatches(&PixelSample::new(vec![1])), None);
    }
}
