//! 시세 조회 간격 정의.
//!
//! Yahoo Finance 차트 API가 받아들이는 간격 문자열과 1:1로 대응합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 시세 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    /// 1분봉
    #[serde(rename = "1m")]
    M1,
    /// 2분봉
    #[serde(rename = "2m")]
    M2,
    /// 5분봉
    #[serde(rename = "5m")]
    M5,
    /// 15분봉
    #[serde(rename = "15m")]
    M15,
    /// 30분봉
    #[serde(rename = "30m")]
    M30,
    /// 60분봉
    #[serde(rename = "60m")]
    M60,
    /// 90분봉
    #[serde(rename = "90m")]
    M90,
    /// 1시간봉
    #[serde(rename = "1h")]
    H1,
    /// 일봉
    #[default]
    #[serde(rename = "1d")]
    D1,
    /// 5일봉
    #[serde(rename = "5d")]
    D5,
    /// 주봉
    #[serde(rename = "1wk")]
    W1,
    /// 월봉
    #[serde(rename = "1mo")]
    MN1,
    /// 분기봉
    #[serde(rename = "3mo")]
    MN3,
}

impl Interval {
    /// Yahoo Finance 간격 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M2 => "2m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::M60 => "60m",
            Interval::M90 => "90m",
            Interval::H1 => "1h",
            Interval::D1 => "1d",
            Interval::D5 => "5d",
            Interval::W1 => "1wk",
            Interval::MN1 => "1mo",
            Interval::MN3 => "3mo",
        }
    }

    /// 분봉/시간봉인지 확인합니다.
    ///
    /// 날짜 표시 형식을 고를 때 사용합니다.
    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            Interval::M1
                | Interval::M2
                | Interval::M5
                | Interval::M15
                | Interval::M30
                | Interval::M60
                | Interval::M90
                | Interval::H1
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(Interval::M1),
            "2m" => Ok(Interval::M2),
            "5m" => Ok(Interval::M5),
            "15m" => Ok(Interval::M15),
            "30m" => Ok(Interval::M30),
            "60m" => Ok(Interval::M60),
            "90m" => Ok(Interval::M90),
            "1h" => Ok(Interval::H1),
            "1d" | "d" | "daily" => Ok(Interval::D1),
            "5d" => Ok(Interval::D5),
            "1wk" | "1w" | "weekly" => Ok(Interval::W1),
            "1mo" | "monthly" => Ok(Interval::MN1),
            "3mo" => Ok(Interval::MN3),
            _ => Err(format!(
                "Invalid interval: {}. Supported: 1m 2m 5m 15m 30m 60m 90m 1h 1d 5d 1wk 1mo 3mo",
                s
            )),
        }
    }
}
