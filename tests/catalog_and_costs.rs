use gpu_investment_toolbox::catalog::{devices, devices_by_type, find_device, CardType};
use gpu_investment_toolbox::comparison::{compare_ids, ComparisonError, MAX_COMPARED};
use gpu_investment_toolbox::finance::provider_cost::{
    provider_costs, ProviderCostInput, ProviderCostSettings,
};
use gpu_investment_toolbox::finance::{IrrSettings, ProjectionParams};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn catalog_ids_are_unique_and_priced() {
    let all = devices();
    assert_eq!(all.len(), 20);
    for (i, d) in all.iter().enumerate() {
        assert!(d.price > 0.0, "{}", d.id);
        assert!(d.power_active_w > d.power_idle_w, "{}", d.id);
        assert!(all[i + 1..].iter().all(|o| o.id != d.id), "dup {}", d.id);
    }
}

#[test]
fn lookup_accepts_id_or_name() {
    assert_eq!(find_device("H200").map(|d| d.id), Some("h200"));
    assert_eq!(
        find_device("NVIDIA GeForce RTX 4090").map(|d| d.id),
        Some("rtx-4090")
    );
    assert!(find_device("voodoo2").is_none());
}

#[test]
fn card_type_filter_partitions_catalog() {
    let total: usize = [CardType::DataCenter, CardType::Workstation, CardType::Consumer]
        .into_iter()
        .map(|t| devices_by_type(t).count())
        .sum();
    assert_eq!(total, devices().len());
    assert!(devices_by_type(CardType::Consumer).all(|d| d.card_type == CardType::Consumer));
}

#[test]
fn a100_provider_costs_at_default_mix() {
    let a100 = find_device("a100-80gb-pcie").unwrap();
    let costs = provider_costs(&ProviderCostInput {
        settings: ProviderCostSettings::default(),
        power_active_w: a100.power_active_w,
        power_idle_w: a100.power_idle_w,
        idle_fraction: 0.1,
        duration_years: 3,
    })
    .unwrap();
    // 0.1 * 50 + 0.9 * 400
    assert_close("watts", costs.weighted_power_w, 365.0, 1e-12);
    assert_close("power", costs.power_per_year, 365.0 * 8760.0 * 0.24 / 1000.0, 1e-12);
    assert_close("rack", costs.rack_per_year, 150.0, 1e-12);
    assert_close("network", costs.network_per_year, 150.0, 1e-12);
    assert_close("contract", costs.total_over_contract, costs.total_per_year * 3.0, 1e-12);
}

#[test]
fn comparison_caps_at_three_devices() {
    let ids: Vec<String> = ["a40", "l4", "l40", "l40s"].iter().map(|s| s.to_string()).collect();
    let err = compare_ids(
        &ids,
        &ProjectionParams::default(),
        &ProviderCostSettings::default(),
        &IrrSettings::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ComparisonError::TooMany {
            requested: 4,
            max: MAX_COMPARED
        }
    );

    let rows = compare_ids(
        &ids[..MAX_COMPARED],
        &ProjectionParams::default(),
        &ProviderCostSettings::default(),
        &IrrSettings::default(),
    )
    .unwrap();
    assert_eq!(rows.len(), MAX_COMPARED);
}
