use crate::catalog::DeviceRecord;
use crate::comparison::ComparisonRow;
use crate::finance::provider_cost::ProviderCostResult;
use crate::finance::rates::{HostingMode, RateSource, ResolvedRate};
use crate::finance::{IrrOutcome, OpexBearer, PaybackPoint, Projection, Schedule};
use crate::i18n::{keys, Translator};

fn fmt_rate(rate: Option<f64>, tr: &Translator) -> String {
    rate.map(|r| format!("{r:.3}"))
        .unwrap_or_else(|| tr.t(keys::NOT_AVAILABLE).to_string())
}

/// IRR 결과를 표시 문자열로 만든다. 수치가 아니면 N/A 계열 문구를 쓴다.
pub fn format_irr(tr: &Translator, outcome: IrrOutcome) -> String {
    match outcome {
        IrrOutcome::Rate(r) => format!("{:.1}%", r * 100.0),
        IrrOutcome::NeverRecovers => tr.t(keys::REPORT_IRR_NEVER_RECOVERS).to_string(),
        IrrOutcome::NonConvergent => tr.t(keys::REPORT_IRR_NON_CONVERGENT).to_string(),
        IrrOutcome::Undefined => tr.t(keys::NOT_AVAILABLE).to_string(),
    }
}

pub fn format_payback(tr: &Translator, payback: PaybackPoint) -> String {
    if payback.reached_within_horizon {
        format!("{:.1} mo", payback.months)
    } else {
        format!(
            "{:.0} mo ({})",
            payback.months,
            tr.t(keys::REPORT_PAYBACK_NOT_REACHED)
        )
    }
}

fn source_label(tr: &Translator, source: RateSource) -> &str {
    match source {
        RateSource::Requested => tr.t(keys::RATE_SOURCE_REQUESTED),
        RateSource::CommunityFallback => tr.t(keys::RATE_SOURCE_COMMUNITY_FALLBACK),
        RateSource::Unavailable => tr.t(keys::RATE_SOURCE_UNAVAILABLE),
    }
}

/// 티어 요율과 그 출처를 한 줄로 만든다.
pub fn format_tier(tr: &Translator, tier: ResolvedRate) -> String {
    format!("${:.3}/h ({})", tier.rate, source_label(tr, tier.source))
}

fn mode_label(mode: HostingMode) -> &'static str {
    match mode {
        HostingMode::Community => "Community",
        HostingMode::Secure => "Secure",
    }
}

/// 카탈로그 목록을 출력한다.
pub fn print_catalog<'a>(tr: &Translator, devices: impl Iterator<Item = &'a DeviceRecord>) {
    println!("{}", tr.t(keys::CATALOG_HEADING));
    println!("{}", tr.t(keys::CATALOG_COLUMNS));
    for d in devices {
        println!(
            "{:<19} {:<33} {:<13} {:>8.0}  {:>9} {:>13}  {:>4.0}/{:<4.0}",
            d.id,
            d.name,
            d.card_type.label(),
            d.price,
            fmt_rate(d.community_spot, tr),
            fmt_rate(d.community_on_demand, tr),
            d.power_active_w,
            d.power_idle_w,
        );
    }
}

fn line(label: &str, value: String) {
    println!("{label:<26}: {value}");
}

/// 시나리오 계산 결과를 출력한다.
pub fn print_projection(tr: &Translator, p: &Projection, opex_bearer: OpexBearer, show_schedule: bool) {
    println!("{}", tr.t(keys::REPORT_HEADING));
    println!("{} ({})", p.device_name, p.device_id);
    line(tr.t(keys::REPORT_HOSTING_MODE), mode_label(p.rates.mode).to_string());
    if p.rates.used_fallback() {
        println!("{}", tr.t(keys::REPORT_FALLBACK_WARNING));
        line(tr.t(keys::REPORT_TIER_SPOT), format_tier(tr, p.rates.spot));
        line(tr.t(keys::REPORT_TIER_ON_DEMAND), format_tier(tr, p.rates.on_demand));
    }
    line(
        tr.t(keys::REPORT_EFFECTIVE_RATE),
        format!("${:.3}/h", p.effective_hourly_rate),
    );
    line(
        tr.t(keys::REPORT_INITIAL_INVESTMENT),
        format!("${:.2}", p.initial_investment),
    );
    if opex_bearer == OpexBearer::Owner {
        line(tr.t(keys::REPORT_OWNER_OPEX), format!("${:.2}", p.owner_opex_total));
    }
    line(tr.t(keys::REPORT_TCO), format!("${:.2}", p.total_cost_of_ownership));
    line(
        tr.t(keys::REPORT_GROSS_REVENUE),
        format!("${:.2}", p.total_gross_revenue),
    );
    line(tr.t(keys::REPORT_PLATFORM_FEE), format!("${:.2}", p.platform_fee_total));
    line(
        tr.t(keys::REPORT_OWNER_REVENUE),
        format!("${:.2}", p.total_owner_revenue),
    );
    line(
        tr.t(keys::REPORT_PROVIDER_REVENUE),
        format!("${:.2}", p.provider_revenue_total),
    );
    line(
        tr.t(keys::REPORT_ANNUAL_OWNER_REVENUE),
        format!("${:.2}", p.annual_owner_revenue),
    );
    line(tr.t(keys::REPORT_RESIDUAL_VALUE), format!("${:.2}", p.residual_value));
    line(tr.t(keys::REPORT_ROI), format!("{:.1}%", p.roi_pct));
    line(tr.t(keys::REPORT_ANNUAL_ROI), format!("{:.1}%", p.annual_roi_pct));
    line(tr.t(keys::REPORT_PAYBACK), format_payback(tr, p.payback));
    line(tr.t(keys::REPORT_IRR_ANNUAL), format_irr(tr, p.annual_irr));
    line(tr.t(keys::REPORT_IRR_PERIODIC), format_irr(tr, p.periodic_irr));

    println!("{}", tr.t(keys::REPORT_YEARLY_HEADING));
    for (i, total) in p.yearly_owner_revenue.iter().enumerate() {
        println!("{} {:>2}: ${:.2}", tr.t(keys::REPORT_YEAR), i + 1, total);
    }
    if opex_bearer == OpexBearer::Provider {
        println!("\n{}", tr.t(keys::REPORT_OPEX_PROVIDER_NOTE));
    }
    if show_schedule {
        print_schedule(tr, &p.schedule);
    }
}

pub fn print_schedule(tr: &Translator, schedule: &Schedule) {
    println!("{}", tr.t(keys::SCHEDULE_HEADING));
    println!("{}", tr.t(keys::SCHEDULE_COLUMNS));
    for e in &schedule.entries {
        println!(
            "{:>5}  {:>9.4}  {:>11.2}  {:>13.2}  {:>13.2}",
            e.month, e.hourly_rate, e.gross_revenue, e.owner_revenue, e.cumulative_revenue
        );
    }
}

/// 비교 결과를 한 줄씩 출력한다.
pub fn print_comparison(tr: &Translator, rows: &[ComparisonRow]) {
    println!("{}", tr.t(keys::COMPARE_HEADING));
    println!("{}", tr.t(keys::COMPARE_COLUMNS));
    for row in rows {
        let p = &row.projection;
        let payback = if p.payback.reached_within_horizon {
            format!("{:.1}", p.payback.months)
        } else {
            format!(">{:.0}", p.payback.months)
        };
        println!(
            "{:<33} {:>9.0}  {:>11.2}  {:>7.1}  {:>7}  {}",
            row.device.name,
            row.device.price,
            p.annual_owner_revenue,
            p.roi_pct,
            payback,
            format_irr(tr, p.annual_irr),
        );
    }
}

pub fn print_costs(tr: &Translator, device: &DeviceRecord, costs: &ProviderCostResult) {
    println!("{}", tr.t(keys::COSTS_HEADING));
    println!("{} ({})", device.name, device.id);
    line(
        tr.t(keys::COSTS_WEIGHTED_POWER),
        format!("{:.1} W", costs.weighted_power_w),
    );
    line(tr.t(keys::COSTS_POWER), format!("${:.2}", costs.power_per_year));
    line(tr.t(keys::COSTS_RACK), format!("${:.2}", costs.rack_per_year));
    line(tr.t(keys::COSTS_NETWORK), format!("${:.2}", costs.network_per_year));
    line(tr.t(keys::COSTS_TOTAL_YEAR), format!("${:.2}", costs.total_per_year));
    line(tr.t(keys::COSTS_PER_HOUR), format!("${:.3}", costs.cost_per_hour));
    line(tr.t(keys::COSTS_PER_MONTH), format!("${:.2}", costs.cost_per_month));
    line(
        tr.t(keys::COSTS_CONTRACT_TOTAL),
        format!("${:.2}", costs.total_over_contract),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irr_sentinels_render_as_text() {
        let tr = Translator::new("en-us");
        assert_eq!(format_irr(&tr, IrrOutcome::Rate(0.123)), "12.3%");
        assert_eq!(format_irr(&tr, IrrOutcome::Undefined), "N/A");
        assert_eq!(
            format_irr(&tr, IrrOutcome::NonConvergent),
            "did not converge"
        );
    }

    #[test]
    fn fallback_tiers_name_their_source() {
        let tr = Translator::new("en-us");
        let community = ResolvedRate {
            rate: 1.64,
            source: RateSource::CommunityFallback,
        };
        let missing = ResolvedRate {
            rate: 0.0,
            source: RateSource::Unavailable,
        };
        assert_eq!(format_tier(&tr, community), "$1.640/h (community tier used)");
        assert_eq!(format_tier(&tr, missing), "$0.000/h (no rate, counted as zero)");
    }

    #[test]
    fn unreached_payback_is_labelled() {
        let tr = Translator::new("en-us");
        let text = format_payback(
            &tr,
            PaybackPoint {
                months: 12.0,
                reached_within_horizon: false,
            },
        );
        assert_eq!(text, "12 mo (not reached within contract)");
    }
}
