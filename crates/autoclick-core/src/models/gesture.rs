//! 스크롤 입력 단위.

use serde::{Deserialize, Serialize};

/// 스크롤 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// 스크롤 한 번의 양 (휠 단위)
///
/// 부호 규약은 어댑터마다 다르므로 방향과 크기를 분리해 둔다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollDelta {
    pub direction: ScrollDirection,
    pub amount: u32,
}

impl ScrollDelta {
    pub fn up(amount: u32) -> Self {
        Self {
            direction: ScrollDirection::Up,
            amount,
        }
    }

    pub fn down(amount: u32) -> Self {
        Self {
            direction: ScrollDirection::Down,
            amount,
        }
    }

    /// 아래 방향이 양수인 부호 있는 값 (enigo 규약)
    pub fn signed_down_positive(&self) -> i32 {
        let amount = i32::try_from(self.amount).unwrap_or(i32::MAX);
        match self.direction {
            ScrollDirection::Down => amount,
            ScrollDirection::Up => -amount,
        }
    }
}

impl std::fmt::Display for ScrollDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            ScrollDirection::Up => "위",
            ScrollDirection::Down => "아래",
        };
        write!(f, "{direction} {}", self.amount)
    }
}
