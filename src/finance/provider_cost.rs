use serde::{Deserialize, Serialize};

use super::error::{check_fraction, FinanceError, FinanceResult};
use super::schedule::{HOURS_PER_YEAR, MONTHS_PER_YEAR};

/// 호스팅 사업자(데이터센터) 운영비 단가.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderCostSettings {
    /// 전력 단가 [USD/kWh]
    pub power_price_per_kwh: f64,
    /// 랙 임대료 [USD/월/랙]
    pub rack_cost_per_month: f64,
    /// 네트워크 비용 [USD/월/랙]
    pub network_cost_per_month: f64,
    /// 랙당 GPU 수
    pub gpus_per_rack: u32,
}

impl Default for ProviderCostSettings {
    fn default() -> Self {
        Self {
            power_price_per_kwh: 0.24,
            rack_cost_per_month: 200.0,
            network_cost_per_month: 200.0,
            gpus_per_rack: 16,
        }
    }
}

/// GPU 1대의 운영비 계산 입력.
#[derive(Debug, Clone)]
pub struct ProviderCostInput {
    pub settings: ProviderCostSettings,
    /// 부하 시 소비 전력 [W]
    pub power_active_w: f64,
    /// 유휴 시 소비 전력 [W]
    pub power_idle_w: f64,
    /// 정규화된 유휴 비중(0~1)
    pub idle_fraction: f64,
    pub duration_years: u32,
}

/// 운영비 계산 결과. 금액은 모두 GPU 1대 기준.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderCostResult {
    /// 유휴/부하 비중 가중 평균 전력 [W]
    pub weighted_power_w: f64,
    pub power_per_year: f64,
    pub rack_per_year: f64,
    pub network_per_year: f64,
    pub total_per_year: f64,
    pub cost_per_hour: f64,
    pub cost_per_month: f64,
    /// 계약 기간 전체 운영비
    pub total_over_contract: f64,
}

/// 전력/랙/네트워크 운영비를 GPU 1대 기준으로 계산한다.
pub fn provider_costs(input: &ProviderCostInput) -> FinanceResult<ProviderCostResult> {
    let s = &input.settings;
    if s.gpus_per_rack == 0 {
        return Err(FinanceError::InvalidInput("랙당 GPU 수는 1 이상이어야 합니다."));
    }
    let prices = [
        s.power_price_per_kwh,
        s.rack_cost_per_month,
        s.network_cost_per_month,
        input.power_active_w,
        input.power_idle_w,
    ];
    if prices.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(FinanceError::InvalidInput(
            "전력/단가 값은 0 이상이어야 합니다.",
        ));
    }
    let idle = check_fraction("유휴 비중", input.idle_fraction)?;

    let weighted_power_w = idle * input.power_idle_w + (1.0 - idle) * input.power_active_w;
    let power_per_year = weighted_power_w * HOURS_PER_YEAR * s.power_price_per_kwh / 1000.0;
    let per_unit = |monthly: f64| monthly * f64::from(MONTHS_PER_YEAR) / f64::from(s.gpus_per_rack);
    let rack_per_year = per_unit(s.rack_cost_per_month);
    let network_per_year = per_unit(s.network_cost_per_month);
    let total_per_year = power_per_year + rack_per_year + network_per_year;

    Ok(ProviderCostResult {
        weighted_power_w,
        power_per_year,
        rack_per_year,
        network_per_year,
        total_per_year,
        cost_per_hour: total_per_year / HOURS_PER_YEAR,
        cost_per_month: total_per_year / f64::from(MONTHS_PER_YEAR),
        total_over_contract: total_per_year * f64::from(input.duration_years),
    })
}
