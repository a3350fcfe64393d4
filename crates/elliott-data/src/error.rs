//! 데이터 모듈 오류 타입.

use elliott_core::ElliottError;
use thiserror::Error;

/// 시세 조회 및 파일 입출력 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 네트워크/연결 오류
    #[error("Network error: {0}")]
    Network(String),

    /// 요청 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// API 오류 응답
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// 응답 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 조회 결과 없음 (티커)
    #[error("No data for {0}")]
    NoData(String),

    /// 파일을 찾을 수 없음
    #[error("File not found: {0}")]
    NotFound(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// CSV 읽기/쓰기 오류
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// 데이터 작업 결과 타입.
pub type Result<T> = std::result::Result<T, DataError>;

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_decode() {
            DataError::Parse(err.to_string())
        } else {
            DataError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

impl From<DataError> for ElliottError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Network(_) | DataError::Timeout(_) => ElliottError::Network(err.to_string()),
            DataError::Parse(_) | DataError::Csv(_) => ElliottError::Parse(err.to_string()),
            DataError::NotFound(_) => ElliottError::NotFound(err.to_string()),
            DataError::InvalidData(_) => ElliottError::InvalidInput(err.to_string()),
            DataError::Api { .. } | DataError::NoData(_) | DataError::Io(_) => {
                ElliottError::Data(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_message() {
        assert_eq!(DataError::NoData("AAPL".into()).to_string(), "No data for AAPL");
    }

    #[test]
    fn test_conversion_into_core_error() {
        let err: ElliottError = DataError::Timeout("30s".into()).into();
        assert!(err.is_retryable());

        let err: ElliottError = DataError::NoData("ZZZZ".into()).into();
        assert!(matches!(err, ElliottError::Data(ref msg) if msg == "No data for ZZZZ"));
        assert!(!err.is_retryable());
    }
}
