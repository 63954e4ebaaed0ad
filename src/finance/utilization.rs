use serde::{Deserialize, Serialize};

use super::error::{FinanceError, FinanceResult};

/// 유휴/스팟/온디맨드 가동 비중. 합이 1일 필요는 없고 사용 전에 정규화한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilizationMix {
    pub idle: f64,
    pub spot: f64,
    pub on_demand: f64,
}

impl Default for UtilizationMix {
    fn default() -> Self {
        Self {
            idle: 10.0,
            spot: 20.0,
            on_demand: 70.0,
        }
    }
}

/// 합이 1이 되도록 정규화된 가동 비중.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedMix {
    pub idle: f64,
    pub spot: f64,
    pub on_demand: f64,
}

impl NormalizedMix {
    /// 유휴 시간은 수익이 0이므로 스팟/온디맨드 요율만 가중 평균한다.
    pub fn weighted_rate(&self, spot_rate: f64, on_demand_rate: f64) -> f64 {
        self.spot * spot_rate + self.on_demand * on_demand_rate
    }
}

impl UtilizationMix {
    pub fn new(idle: f64, spot: f64, on_demand: f64) -> Self {
        Self {
            idle,
            spot,
            on_demand,
        }
    }

    /// 세 비중을 합으로 나눠 정규화한다. 음수/비유한 값이나 합 0은 거부한다.
    pub fn normalize(&self) -> FinanceResult<NormalizedMix> {
        let shares = [self.idle, self.spot, self.on_demand];
        if shares.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(FinanceError::InvalidInput(
                "가동률 비중은 0 이상의 유한한 값이어야 합니다.",
            ));
        }
        let total: f64 = shares.iter().sum();
        if total <= 0.0 {
            return Err(FinanceError::ZeroUtilization);
        }
        Ok(NormalizedMix {
            idle: self.idle / total,
            spot: self.spot / total,
            on_demand: self.on_demand / total,
        })
    }
}
