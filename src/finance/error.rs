use thiserror::Error;

/// 투자 계산 엔진에서 발생 가능한 오류를 표현한다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    /// 입력값이 잘못된 경우
    #[error("입력 오류: {0}")]
    InvalidInput(&'static str),
    /// 가동률 비중 합이 0이라 분배를 정의할 수 없음
    #[error("가동률 비중의 합이 0입니다. 유휴/스팟/온디맨드 중 하나 이상을 지정하세요.")]
    ZeroUtilization,
    /// 구매 가격이 0 이하
    #[error("구매 가격은 0보다 커야 합니다: {0}")]
    NonPositivePrice(f64),
    /// 0~1 범위를 벗어난 비율
    #[error("{name} 값 {value}은(는) 0~1 범위여야 합니다.")]
    FractionOutOfRange { name: &'static str, value: f64 },
}

pub type FinanceResult<T> = Result<T, FinanceError>;

/// 0~1 범위의 유한한 비율인지 확인한다.
pub(crate) fn check_fraction(name: &'static str, value: f64) -> FinanceResult<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(FinanceError::FractionOutOfRange { name, value })
    }
}
