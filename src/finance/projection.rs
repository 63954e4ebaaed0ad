//! 한 GPU 투자 시나리오를 끝까지 계산한다.
//!
//! 월별 스케줄 → 회수 시점 → IRR 현금흐름 → IRR 순서로 진행하며,
//! 모든 사용자 조정값은 [`ProjectionParams`] 하나로 받는다.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{check_fraction, FinanceError, FinanceResult};
use super::irr::{annualize, solve_irr, IrrOutcome, IrrSettings};
use super::provider_cost::{provider_costs, ProviderCostInput, ProviderCostResult, ProviderCostSettings};
use super::rates::{resolve_rates, HostingMode, ResolvedRates};
use super::schedule::{
    build_monthly_schedule, find_payback_month, PaybackPoint, Schedule, ScheduleInput,
    MONTHS_PER_YEAR,
};
use super::utilization::UtilizationMix;
use crate::catalog::DeviceRecord;

/// 운영비(전력/랙/네트워크)를 누가 부담하는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OpexBearer {
    /// 호스팅 사업자가 부담. 소유자는 초기 구매비만 낸다.
    #[default]
    Provider,
    /// 소유자가 운영비까지 부담
    Owner,
}

/// IRR 현금흐름의 기간 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IrrPeriod {
    #[default]
    Monthly,
    Yearly,
}

/// 시나리오 조정값 묶음.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    pub hosting_mode: HostingMode,
    /// 플랫폼 수수료(0~1)
    pub platform_fee: f64,
    /// 수수료 차감 후 소유자 몫(0~1)
    pub owner_share: f64,
    pub duration_years: u32,
    /// 월간 요율 감쇠율(0~1)
    pub monthly_decay: f64,
    /// 계약 종료 시 구매가 대비 잔존가치 비율(0~1)
    pub residual_fraction: f64,
    /// GPU 1대당 배분되는 공용 인프라 비용 [USD]
    pub infrastructure_cost_per_unit: f64,
    pub opex_bearer: OpexBearer,
    pub irr_period: IrrPeriod,
    /// 설정 파일에서 하위 테이블로 직렬화되므로 마지막에 둔다.
    pub utilization: UtilizationMix,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            hosting_mode: HostingMode::Secure,
            utilization: UtilizationMix::default(),
            platform_fee: 0.20,
            owner_share: 0.50,
            duration_years: 3,
            monthly_decay: 0.0,
            residual_fraction: 0.0,
            infrastructure_cost_per_unit: 0.0,
            opex_bearer: OpexBearer::Provider,
            irr_period: IrrPeriod::Monthly,
        }
    }
}

/// 시나리오 계산 결과. 표시 계층과 차트가 그대로 소비한다.
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    pub device_id: String,
    pub device_name: String,
    pub rates: ResolvedRates,
    /// 첫 달 가동률 가중 요율 [USD/h]
    pub effective_hourly_rate: f64,
    /// 구매가 + 인프라 배분액
    pub initial_investment: f64,
    /// 소유자가 부담하는 계약 기간 운영비
    pub owner_opex_total: f64,
    pub total_cost_of_ownership: f64,
    pub total_gross_revenue: f64,
    pub platform_fee_total: f64,
    pub total_owner_revenue: f64,
    pub provider_revenue_total: f64,
    pub annual_owner_revenue: f64,
    pub residual_value: f64,
    pub roi_pct: f64,
    pub annual_roi_pct: f64,
    pub payback: PaybackPoint,
    /// `irr_period` 단위 수익률
    pub periodic_irr: IrrOutcome,
    pub annual_irr: IrrOutcome,
    pub yearly_owner_revenue: Vec<f64>,
    pub provider_costs: ProviderCostResult,
    pub cash_flows: Vec<f64>,
    pub schedule: Schedule,
}

/// 소유자 순현금흐름을 IRR 입력 벡터로 만든다. 잔존가치는 마지막 항목에 더한다.
fn irr_cash_flows(
    initial_investment: f64,
    monthly_net: &[f64],
    residual_value: f64,
    period: IrrPeriod,
) -> Vec<f64> {
    let mut flows = Vec::with_capacity(monthly_net.len() + 1);
    flows.push(-initial_investment);
    match period {
        IrrPeriod::Monthly => flows.extend_from_slice(monthly_net),
        IrrPeriod::Yearly => flows.extend(
            monthly_net
                .chunks(MONTHS_PER_YEAR as usize)
                .map(|year| year.iter().sum::<f64>()),
        ),
    }
    if let Some(last) = flows.last_mut() {
        *last += residual_value;
    }
    flows
}

/// 장비 한 대와 시나리오 조정값으로 전체 투자 지표를 계산한다.
pub fn project(
    device: &DeviceRecord,
    params: &ProjectionParams,
    provider: &ProviderCostSettings,
    solver: &IrrSettings,
) -> FinanceResult<Projection> {
    if !device.price.is_finite() || device.price <= 0.0 {
        return Err(FinanceError::NonPositivePrice(device.price));
    }
    let infra = params.infrastructure_cost_per_unit;
    if !infra.is_finite() || infra < 0.0 {
        return Err(FinanceError::InvalidInput(
            "인프라 배분 비용은 0 이상이어야 합니다.",
        ));
    }
    let residual_fraction = check_fraction("잔존가치 비율", params.residual_fraction)?;
    let mix = params.utilization.normalize()?;
    let rates = resolve_rates(device, params.hosting_mode);

    let schedule = build_monthly_schedule(&ScheduleInput {
        spot_rate: rates.spot.rate,
        on_demand_rate: rates.on_demand.rate,
        utilization: params.utilization,
        platform_fee: params.platform_fee,
        owner_share: params.owner_share,
        monthly_decay: params.monthly_decay,
        duration_years: params.duration_years,
    })?;
    let costs = provider_costs(&ProviderCostInput {
        settings: provider.clone(),
        power_active_w: device.power_active_w,
        power_idle_w: device.power_idle_w,
        idle_fraction: mix.idle,
        duration_years: params.duration_years,
    })?;

    let years = f64::from(params.duration_years);
    let monthly_opex = match params.opex_bearer {
        OpexBearer::Provider => 0.0,
        OpexBearer::Owner => costs.cost_per_month,
    };
    let initial_investment = device.price + infra;
    let owner_opex_total = monthly_opex * f64::from(schedule.horizon_months());
    let total_cost_of_ownership = initial_investment + owner_opex_total;

    let total_gross_revenue = schedule.total_gross_revenue();
    let platform_fee_total = total_gross_revenue * params.platform_fee;
    let total_owner_revenue = schedule.total_owner_revenue();
    let provider_revenue_total = total_gross_revenue - platform_fee_total - total_owner_revenue;
    let annual_owner_revenue = total_owner_revenue / years;
    let residual_value = device.price * residual_fraction;

    let roi_pct =
        (total_owner_revenue + residual_value - total_cost_of_ownership) / total_cost_of_ownership * 100.0;
    let annual_roi_pct =
        (annual_owner_revenue - total_cost_of_ownership / years) / initial_investment * 100.0;

    let payback = find_payback_month(&schedule, total_cost_of_ownership);

    let monthly_net: Vec<f64> = schedule
        .monthly_owner_revenue()
        .map(|revenue| revenue - monthly_opex)
        .collect();
    let cash_flows = irr_cash_flows(
        initial_investment,
        &monthly_net,
        residual_value,
        params.irr_period,
    );
    let periodic_irr = solve_irr(&cash_flows, solver);
    let annual_irr = match params.irr_period {
        IrrPeriod::Monthly => annualize(periodic_irr),
        IrrPeriod::Yearly => periodic_irr,
    };

    debug!(
        device = device.id,
        total_owner_revenue,
        roi_pct,
        payback_months = payback.months,
        ?annual_irr,
        "projection complete"
    );

    Ok(Projection {
        device_id: device.id.to_string(),
        device_name: device.name.to_string(),
        rates,
        effective_hourly_rate: schedule.entries.get(1).map(|e| e.hourly_rate).unwrap_or(0.0),
        initial_investment,
        owner_opex_total,
        total_cost_of_ownership,
        total_gross_revenue,
        platform_fee_total,
        total_owner_revenue,
        provider_revenue_total,
        annual_owner_revenue,
        residual_value,
        roi_pct,
        annual_roi_pct,
        payback,
        periodic_irr,
        annual_irr,
        yearly_owner_revenue: schedule.yearly_totals(),
        provider_costs: costs,
        cash_flows,
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yearly_flows_sum_twelve_months() {
        let monthly = vec![10.0; 24];
        let flows = irr_cash_flows(100.0, &monthly, 5.0, IrrPeriod::Yearly);
        assert_eq!(flows, vec![-100.0, 120.0, 125.0]);
    }

    #[test]
    fn monthly_flows_carry_residual_on_last_entry() {
        let flows = irr_cash_flows(100.0, &[1.0, 2.0, 3.0], 50.0, IrrPeriod::Monthly);
        assert_eq!(flows, vec![-100.0, 1.0, 2.0, 53.0]);
    }
}
