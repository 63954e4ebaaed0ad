use gpu_investment_toolbox::catalog::{self, CardType, DeviceRecord};
use gpu_investment_toolbox::finance::provider_cost::ProviderCostSettings;
use gpu_investment_toolbox::finance::rates::{HostingMode, RateSource};
use gpu_investment_toolbox::finance::utilization::UtilizationMix;
use gpu_investment_toolbox::finance::{
    build_monthly_schedule, project, rate_at_month, IrrOutcome, IrrPeriod, IrrSettings, OpexBearer,
    ProjectionParams, ScheduleInput, HOURS_PER_MONTH,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn a100_like() -> DeviceRecord {
    DeviceRecord {
        id: "test-a100",
        name: "Test A100",
        card_type: CardType::DataCenter,
        price: 15_000.0,
        community_spot: Some(0.82),
        community_on_demand: Some(1.64),
        secure_spot: Some(0.82),
        secure_on_demand: Some(1.64),
        power_active_w: 400.0,
        power_idle_w: 50.0,
        memory_gb: 80,
        vcpu: 8,
    }
}

fn full_on_demand_one_year() -> ProjectionParams {
    ProjectionParams {
        platform_fee: 0.0,
        owner_share: 1.0,
        duration_years: 1,
        monthly_decay: 0.0,
        utilization: UtilizationMix::new(0.0, 0.0, 1.0),
        ..ProjectionParams::default()
    }
}

#[test]
fn one_year_full_on_demand_does_not_pay_back() {
    let device = a100_like();
    let p = project(
        &device,
        &full_on_demand_one_year(),
        &ProviderCostSettings::default(),
        &IrrSettings::default(),
    )
    .expect("projection");

    assert_eq!(p.schedule.entries.len(), 13);
    assert_close("monthly", p.schedule.entries[1].owner_revenue, 1_197.2, 1e-9);
    assert_close("total", p.total_owner_revenue, 14_366.4, 1e-9);
    assert_close("roi", p.roi_pct, (14_366.4 - 15_000.0) / 15_000.0 * 100.0, 1e-9);
    assert_eq!(p.payback.months, 12.0);
    assert!(!p.payback.reached_within_horizon);
    match p.annual_irr {
        IrrOutcome::Rate(r) => assert!(r < 0.0 && r > -1.0, "annual irr {r}"),
        other => panic!("expected a rate, got {other:?}"),
    }
}

#[test]
fn two_years_pays_back_in_month_thirteen() {
    let device = a100_like();
    let params = ProjectionParams {
        duration_years: 2,
        ..full_on_demand_one_year()
    };
    let p = project(
        &device,
        &params,
        &ProviderCostSettings::default(),
        &IrrSettings::default(),
    )
    .expect("projection");

    // 12 * 1197.2 = 14366.4, 남은 633.6 / 1197.2
    assert!(p.payback.reached_within_horizon);
    assert_close("payback", p.payback.months, 12.0 + 633.6 / 1_197.2, 1e-9);
    assert!(p.annual_irr.as_rate().unwrap() > 0.0);
}

#[test]
fn decay_compounds_from_the_second_month() {
    let decay = 0.02;
    let schedule = build_monthly_schedule(&ScheduleInput {
        spot_rate: 0.0,
        on_demand_rate: 2.0,
        utilization: UtilizationMix::new(0.0, 0.0, 1.0),
        platform_fee: 0.0,
        owner_share: 1.0,
        monthly_decay: decay,
        duration_years: 2,
    })
    .expect("schedule");

    for entry in &schedule.entries[1..] {
        let expected = 2.0 * (1.0_f64 - decay).powi(entry.month as i32 - 1);
        assert_close("hourly", entry.hourly_rate, expected, 1e-12);
        assert_close("gross", entry.gross_revenue, expected * HOURS_PER_MONTH, 1e-12);
        assert_close(
            "closed form",
            entry.hourly_rate,
            rate_at_month(2.0, decay, entry.month - 1),
            1e-12,
        );
    }
}

#[test]
fn fee_then_share_split_is_consistent() {
    let device = a100_like();
    let params = ProjectionParams {
        platform_fee: 0.2,
        owner_share: 0.5,
        ..full_on_demand_one_year()
    };
    let p = project(
        &device,
        &params,
        &ProviderCostSettings::default(),
        &IrrSettings::default(),
    )
    .expect("projection");

    assert_close("gross", p.total_gross_revenue, 14_366.4, 1e-9);
    assert_close("fee", p.platform_fee_total, 14_366.4 * 0.2, 1e-9);
    assert_close("owner", p.total_owner_revenue, 14_366.4 * 0.4, 1e-9);
    assert_close(
        "split",
        p.platform_fee_total + p.total_owner_revenue + p.provider_revenue_total,
        p.total_gross_revenue,
        1e-12,
    );
}

#[test]
fn owner_borne_opex_raises_cost_and_lowers_irr() {
    let device = a100_like();
    let base = ProjectionParams {
        duration_years: 3,
        ..full_on_demand_one_year()
    };
    let owner = ProjectionParams {
        opex_bearer: OpexBearer::Owner,
        ..base.clone()
    };
    let settings = ProviderCostSettings::default();
    let solver = IrrSettings::default();
    let a = project(&device, &base, &settings, &solver).unwrap();
    let b = project(&device, &owner, &settings, &solver).unwrap();

    assert_eq!(a.owner_opex_total, 0.0);
    assert_close(
        "opex",
        b.owner_opex_total,
        b.provider_costs.cost_per_month * 36.0,
        1e-12,
    );
    assert!(b.total_cost_of_ownership > a.total_cost_of_ownership);
    assert!(b.annual_irr.as_rate().unwrap() < a.annual_irr.as_rate().unwrap());
}

#[test]
fn yearly_irr_period_is_reported_as_annual() {
    let device = a100_like();
    let params = ProjectionParams {
        duration_years: 3,
        irr_period: IrrPeriod::Yearly,
        ..full_on_demand_one_year()
    };
    let p = project(
        &device,
        &params,
        &ProviderCostSettings::default(),
        &IrrSettings::default(),
    )
    .unwrap();
    assert_eq!(p.cash_flows.len(), 4);
    assert_eq!(p.periodic_irr, p.annual_irr);
}

#[test]
fn idle_only_never_recovers() {
    let device = a100_like();
    let params = ProjectionParams {
        utilization: UtilizationMix::new(1.0, 0.0, 0.0),
        ..full_on_demand_one_year()
    };
    let p = project(
        &device,
        &params,
        &ProviderCostSettings::default(),
        &IrrSettings::default(),
    )
    .unwrap();
    assert_eq!(p.total_owner_revenue, 0.0);
    assert_eq!(p.annual_irr, IrrOutcome::NeverRecovers);
    assert_eq!(p.annual_irr.as_rate(), Some(-1.0));
    assert!(!p.payback.reached_within_horizon);
}

#[test]
fn secure_request_falls_back_to_community_rates() {
    let device = DeviceRecord {
        secure_spot: None,
        secure_on_demand: None,
        ..a100_like()
    };
    let params = ProjectionParams {
        hosting_mode: HostingMode::Secure,
        ..full_on_demand_one_year()
    };
    let p = project(
        &device,
        &params,
        &ProviderCostSettings::default(),
        &IrrSettings::default(),
    )
    .unwrap();
    assert!(p.rates.used_fallback());
    assert_eq!(p.rates.on_demand.source, RateSource::CommunityFallback);
    assert_close("total", p.total_owner_revenue, 14_366.4, 1e-9);
}

#[test]
fn every_catalog_device_projects_with_defaults() {
    let params = ProjectionParams::default();
    let settings = ProviderCostSettings::default();
    let solver = IrrSettings::default();
    for device in catalog::devices() {
        let p = project(device, &params, &settings, &solver)
            .unwrap_or_else(|e| panic!("{}: {e}", device.id));
        assert_eq!(p.schedule.entries.len(), 37, "{}", device.id);
        assert!(p.total_owner_revenue > 0.0, "{}", device.id);
    }
}

#[test]
fn invalid_fee_is_rejected() {
    let device = a100_like();
    let params = ProjectionParams {
        platform_fee: 1.5,
        ..ProjectionParams::default()
    };
    assert!(project(
        &device,
        &params,
        &ProviderCostSettings::default(),
        &IrrSettings::default()
    )
    .is_err());
}
