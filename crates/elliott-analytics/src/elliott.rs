//! 엘리어트 5-3 파동 분류기.
//!
//! 마지막 스윙 직전의 스윙 8개를 후보 구간으로 삼아, 충격파(1-5)와 조정파(A-C)의
//! 방향 교대 규칙만으로 5-3 패턴 여부를 판단합니다. 파동 간 비율(피보나치 비율 제약)은
//! 검사하지 않습니다.
//!
//! 마지막 스윙은 아직 확정되지 않은 종료 스윙이므로 후보 구간에서 제외합니다.

use tracing::debug;

use elliott_core::{
    Price, RejectReason, Swing, WaveClassification, WaveLabel, WaveLabeling, WaveTag, WaveTrend,
};

/// 후보 구간 크기.
pub const WINDOW_SIZE: usize = 8;

/// 라벨링에 필요한 최소 스윙 수 (후보 구간 + 제외되는 마지막 스윙).
pub const MIN_SWINGS: usize = WINDOW_SIZE + 1;

/// 스윙 목록의 끝부분을 5-3 패턴으로 분류합니다.
///
/// # 반환
/// - 스윙이 `MIN_SWINGS`개 미만이면 `Rejected { TooFewSwings }`
/// - 1파 시작과 5파 끝 가격이 같으면 `Rejected { UnclearTrend }`
/// - 그 외에는 규칙 충족 여부와 관계없이 8개 라벨이 붙은 `Labeled`
pub fn classify(swings: &[Swing]) -> WaveClassification {
    if swings.len() < MIN_SWINGS {
        debug!(swings = swings.len(), "스윙 부족으로 라벨링 생략");
        return WaveClassification::Rejected {
            reason: RejectReason::TooFewSwings,
        };
    }

    let end = swings.len() - 1;
    let window = &swings[end - WINDOW_SIZE..end];
    let p: Vec<Price> = window.iter().map(|s| s.price).collect();

    let trend = if p[5] > p[0] {
        WaveTrend::Up
    } else if p[5] < p[0] {
        WaveTrend::Down
    } else {
        debug!(price = %p[0], "추세 불분명");
        return WaveClassification::Rejected {
            reason: RejectReason::UnclearTrend,
        };
    };

    let impulse = match trend {
        WaveTrend::Up => p[1] > p[0] && p[2] < p[1] && p[3] > p[2] && p[4] < p[3] && p[5] > p[4],
        WaveTrend::Down => p[1] < p[0] && p[2] > p[1] && p[3] < p[2] && p[4] > p[3] && p[5] < p[4],
    };

    let correction = match trend {
        WaveTrend::Up => p[6] < p[5] && p[7] > p[6],
        WaveTrend::Down => p[6] > p[5] && p[7] < p[6],
    };

    let labels = window
        .iter()
        .zip(WaveTag::SEQUENCE)
        .map(|(swing, tag)| WaveLabel {
            timestamp: swing.timestamp,
            price: swing.price,
            tag,
        })
        .collect();

    debug!(
        trend = %trend,
        impulse,
        correction,
        "5-3 파동 분류 완료"
    );

    WaveClassification::Labeled(WaveLabeling {
        matched: impulse && correction,
        trend,
        labels,
    })
}
