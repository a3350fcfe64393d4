//! 피보나치 되돌림/확장 레벨.
//!
//! 두 가격 `a`(움직임 시작), `b`(움직임 끝) 사이의 기준 레벨을 계산합니다.
//! 검증을 하지 않는 순수 산술 함수이며 실패하지 않습니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use elliott_core::Price;

/// 레벨 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FibonacciLevel {
    /// 레벨 라벨 (예: "0.618")
    pub label: &'static str,
    /// 적용 비율
    pub ratio: Decimal,
    /// 레벨 가격
    pub price: Price,
}

/// 두 가격 사이에서 계산한 레벨 묶음.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FibonacciLevels {
    /// 움직임 시작 가격
    pub start: Price,
    /// 움직임 끝 가격
    pub end: Price,
    /// 라벨 순서대로 나열한 레벨
    pub levels: Vec<FibonacciLevel>,
}

impl FibonacciLevels {
    /// 라벨로 레벨 가격을 찾습니다.
    pub fn get(&self, label: &str) -> Option<Price> {
        self.levels
            .iter()
            .find(|level| level.label == label)
            .map(|level| level.price)
    }

    /// 레벨 순회.
    pub fn iter(&self) -> std::slice::Iter<'_, FibonacciLevel> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<'a> IntoIterator for &'a FibonacciLevels {
    type Item = &'a FibonacciLevel;
    type IntoIter = std::slice::Iter<'a, FibonacciLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

fn retracement_ratios() -> [(&'static str, Decimal); 5] {
    [
        ("0.236", dec!(0.236)),
        ("0.382", dec!(0.382)),
        ("0.5", dec!(0.5)),
        ("0.618", dec!(0.618)),
        ("0.786", dec!(0.786)),
    ]
}

fn extension_ratios() -> [(&'static str, Decimal); 4] {
    [
        ("1.272", dec!(0.272)),
        ("1.618", dec!(0.618)),
        ("2.0", dec!(1.0)),
        ("2.618", dec!(1.618)),
    ]
}

/// 피보나치 되돌림 레벨을 계산합니다.
///
/// 각 비율 `r`에 대해 `b - r * (b - a)`, 그리고 `"1.0"`은 정확히 `a`입니다.
///
/// # 인자
/// * `a` - 움직임 시작 가격
/// * `b` - 움직임 끝 가격
pub fn fibonacci_levels(a: Price, b: Price) -> FibonacciLevels {
    let diff = b - a;
    let mut levels: Vec<FibonacciLevel> = retracement_ratios()
        .into_iter()
        .map(|(label, ratio)| FibonacciLevel {
            label,
            ratio,
            price: b - ratio * diff,
        })
        .collect();
    levels.push(FibonacciLevel {
        label: "1.0",
        ratio: Decimal::ONE,
        price: a,
    });

    FibonacciLevels {
        start: a,
        end: b,
        levels,
    }
}

/// 피보나치 확장 레벨을 계산합니다.
///
/// 움직임 끝 `b`에서 같은 방향으로 `r * (b - a)`만큼 더 나아간 가격이며,
/// 라벨은 움직임 전체 길이 대비 배수(`1 + r`)입니다.
pub fn fibonacci_extensions(a: Price, b: Price) -> FibonacciLevels {
    let diff = b - a;
    let levels = extension_ratios()
        .into_iter()
        .map(|(label, ratio)| FibonacciLevel {
            label,
            ratio: Decimal::ONE + ratio,
            price: b + ratio * diff,
        })
        .collect();

    FibonacciLevels {
        start: a,
        end: b,
        levels,
    }
}
