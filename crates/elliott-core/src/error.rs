//! 파동 분석 시스템의 에러 타입.
//!
//! 핵심 분석 연산(스윙 검출, 피보나치, 파동 분류)은 실패하지 않습니다.
//! 이 모듈의 에러는 입력 검증, 설정, 데이터 수집 경계에서만 발생합니다.

use thiserror::Error;

/// 분석기 공통 에러.
#[derive(Debug, Error)]
pub enum ElliottError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 에러 (시세 없음, 잘못된 응답 등)
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 파싱 에러
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),
}

/// 분석 작업을 위한 Result 타입.
pub type ElliottResult<T> = Result<T, ElliottError>;

impl ElliottError {
    /// 재시도 가능한 에러인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ElliottError::Network(_))
    }

    /// 분류 접두어 없이 원인 메시지만 반환합니다 (결과 CSV의 status 열).
    pub fn message(&self) -> &str {
        match self {
            ElliottError::Config(msg)
            | ElliottError::Data(msg)
            | ElliottError::InvalidInput(msg)
            | ElliottError::Parse(msg)
            | ElliottError::Network(msg)
            | ElliottError::Serialization(msg)
            | ElliottError::NotFound(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for ElliottError {
    fn from(err: serde_json::Error) -> Self {
        ElliottError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ElliottError {
    fn from(err: config::ConfigError) -> Self {
        ElliottError::Config(err.to_string())
    }
}
