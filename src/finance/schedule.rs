//! 월별 임대 수익 스케줄과 회수 시점 계산.
//!
//! 스케줄의 0번 항목은 수익 0의 기준점이고, 이후 항목 `m`은 계약 `m`개월차의
//! 소유자 수익을 담는다. 요율 감쇠는 직전 달 요율에 `(1 - d)`를 곱하는 복리 방식이다.

use serde::Serialize;

use super::error::{check_fraction, FinanceError, FinanceResult};
use super::utilization::UtilizationMix;

/// 1년 = 365일 기준 연간 시간.
pub const HOURS_PER_YEAR: f64 = 365.0 * 24.0;
/// 월 환산 시간. 월 합계 × 12가 연간 합계와 일치하도록 연간 시간을 12로 나눈다.
pub const HOURS_PER_MONTH: f64 = HOURS_PER_YEAR / 12.0;
pub const MONTHS_PER_YEAR: u32 = 12;
/// 허용하는 최대 계약 기간 [년].
pub const MAX_DURATION_YEARS: u32 = 50;

/// 월별 스케줄 생성 입력.
#[derive(Debug, Clone)]
pub struct ScheduleInput {
    /// 스팟 요율 [USD/h]
    pub spot_rate: f64,
    /// 온디맨드 요율 [USD/h]
    pub on_demand_rate: f64,
    pub utilization: UtilizationMix,
    /// 플랫폼 수수료(0~1). 총수익에서 먼저 차감한다.
    pub platform_fee: f64,
    /// 소유자 몫(0~1). 수수료 차감 후 금액에 적용한다.
    pub owner_share: f64,
    /// 월간 요율 감쇠율(0~1). 0이면 감쇠 없음.
    pub monthly_decay: f64,
    /// 계약 기간 [년]
    pub duration_years: u32,
}

/// 스케줄의 한 달.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub month: u32,
    /// 가동률 가중 평균 요율 [USD/h]
    pub hourly_rate: f64,
    /// 수수료 차감 전 총수익
    pub gross_revenue: f64,
    pub owner_revenue: f64,
    pub cumulative_revenue: f64,
}

impl ScheduleEntry {
    fn anchor() -> Self {
        Self {
            month: 0,
            hourly_rate: 0.0,
            gross_revenue: 0.0,
            owner_revenue: 0.0,
            cumulative_revenue: 0.0,
        }
    }
}

/// 월별 수익 스케줄. 길이는 항상 `기간(년) × 12 + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// 계약 종료 월(스케줄 마지막 항목의 월).
    pub fn horizon_months(&self) -> u32 {
        self.entries.last().map(|e| e.month).unwrap_or(0)
    }

    pub fn total_owner_revenue(&self) -> f64 {
        self.entries
            .last()
            .map(|e| e.cumulative_revenue)
            .unwrap_or(0.0)
    }

    pub fn total_gross_revenue(&self) -> f64 {
        self.entries.iter().map(|e| e.gross_revenue).sum()
    }

    /// 기준점을 제외한 월별 소유자 수익.
    pub fn monthly_owner_revenue(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().skip(1).map(|e| e.owner_revenue)
    }

    /// 계약 연차별 소유자 수익 합계.
    pub fn yearly_totals(&self) -> Vec<f64> {
        let monthly: Vec<f64> = self.monthly_owner_revenue().collect();
        monthly
            .chunks(MONTHS_PER_YEAR as usize)
            .map(|year| year.iter().sum())
            .collect()
    }
}

/// 회수 시점. 기간 내 회수하지 못하면 `months`는 계약 종료 월이고 `reached_within_horizon`은 false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaybackPoint {
    pub months: f64,
    pub reached_within_horizon: bool,
}

/// 첫 수익 월을 `k = 0`으로 할 때 `k`번째 달의 감쇠 요율.
pub fn rate_at_month(initial_rate: f64, monthly_decay: f64, k: u32) -> f64 {
    initial_rate * (1.0 - monthly_decay).powi(k as i32)
}

fn check_rate(value: f64, msg: &'static str) -> FinanceResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FinanceError::InvalidInput(msg))
    }
}

/// 요율/가동률/수익 배분 조건으로 월별 소유자 수익 스케줄을 만든다.
pub fn build_monthly_schedule(input: &ScheduleInput) -> FinanceResult<Schedule> {
    let mut spot_rate = check_rate(input.spot_rate, "스팟 요율은 0 이상이어야 합니다.")?;
    let mut on_demand_rate =
        check_rate(input.on_demand_rate, "온디맨드 요율은 0 이상이어야 합니다.")?;
    let platform_fee = check_fraction("플랫폼 수수료", input.platform_fee)?;
    let owner_share = check_fraction("소유자 몫", input.owner_share)?;
    let decay = check_fraction("월간 요율 감쇠율", input.monthly_decay)?;
    if input.duration_years == 0 {
        return Err(FinanceError::InvalidInput(
            "계약 기간은 1년 이상이어야 합니다.",
        ));
    }
    if input.duration_years > MAX_DURATION_YEARS {
        return Err(FinanceError::InvalidInput(
            "계약 기간은 50년 이하여야 합니다.",
        ));
    }
    let mix = input.utilization.normalize()?;

    let duration_months = input.duration_years * MONTHS_PER_YEAR;
    let mut entries = Vec::with_capacity(duration_months as usize + 1);
    entries.push(ScheduleEntry::anchor());

    let mut cumulative = 0.0;
    for index in 0..duration_months {
        if index > 0 {
            spot_rate *= 1.0 - decay;
            on_demand_rate *= 1.0 - decay;
        }
        let hourly_rate = mix.weighted_rate(spot_rate, on_demand_rate);
        let gross = hourly_rate * HOURS_PER_MONTH;
        let net = gross * (1.0 - platform_fee);
        let owner = net * owner_share;
        cumulative += owner;
        entries.push(ScheduleEntry {
            month: index + 1,
            hourly_rate,
            gross_revenue: gross,
            owner_revenue: owner,
            cumulative_revenue: cumulative,
        });
    }

    Ok(Schedule { entries })
}

/// 누적 소유자 수익이 총 투자액에 처음 도달하는 시점을 월 단위(소수)로 찾는다.
///
/// 도달한 달 안에서는 선형 보간한다. 해당 월 수익이 0이면 월 경계 값을 돌려준다.
pub fn find_payback_month(schedule: &Schedule, total_investment: f64) -> PaybackPoint {
    if total_investment <= 0.0 {
        return PaybackPoint {
            months: 0.0,
            reached_within_horizon: true,
        };
    }
    for pair in schedule.entries.windows(2) {
        let prior = pair[0];
        let current = pair[1];
        if current.cumulative_revenue >= total_investment {
            // 정확히 월말에 도달하면 보간 오차 없이 월 경계를 쓴다.
            let months = if current.owner_revenue > 0.0
                && current.cumulative_revenue != total_investment
            {
                let frac = (total_investment - prior.cumulative_revenue) / current.owner_revenue;
                f64::from(prior.month) + frac.clamp(0.0, 1.0)
            } else {
                f64::from(current.month)
            };
            return PaybackPoint {
                months,
                reached_within_horizon: true,
            };
        }
    }
    PaybackPoint {
        months: f64::from(schedule.horizon_months()),
        reached_within_horizon: false,
    }
}
