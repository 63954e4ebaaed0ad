//! 여러 GPU를 같은 시나리오 조건으로 나란히 비교한다.

use thiserror::Error;

use crate::catalog::{find_device, DeviceRecord};
use crate::finance::provider_cost::ProviderCostSettings;
use crate::finance::{project, FinanceError, IrrSettings, Projection, ProjectionParams};

/// 한 번에 비교할 수 있는 최대 장비 수.
pub const MAX_COMPARED: usize = 3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComparisonError {
    #[error("비교할 GPU를 1개 이상 선택하세요.")]
    Empty,
    #[error("최대 {max}개까지 비교할 수 있습니다 (요청 {requested}개).")]
    TooMany { requested: usize, max: usize },
    #[error("중복된 GPU: {0}")]
    Duplicate(String),
    #[error("알 수 없는 GPU: {0}")]
    UnknownDevice(String),
    #[error("{device}: {source}")]
    Projection { device: String, source: FinanceError },
}

/// 비교 표 한 줄.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub device: &'static DeviceRecord,
    pub projection: Projection,
}

/// ID 목록을 카탈로그에서 찾아 각각 계산한다.
pub fn compare_ids(
    ids: &[String],
    params: &ProjectionParams,
    provider: &ProviderCostSettings,
    solver: &IrrSettings,
) -> Result<Vec<ComparisonRow>, ComparisonError> {
    if ids.is_empty() {
        return Err(ComparisonError::Empty);
    }
    if ids.len() > MAX_COMPARED {
        return Err(ComparisonError::TooMany {
            requested: ids.len(),
            max: MAX_COMPARED,
        });
    }
    let mut devices: Vec<&'static DeviceRecord> = Vec::with_capacity(ids.len());
    for id in ids {
        let device = find_device(id).ok_or_else(|| ComparisonError::UnknownDevice(id.clone()))?;
        if devices.iter().any(|d| d.id == device.id) {
            return Err(ComparisonError::Duplicate(device.id.to_string()));
        }
        devices.push(device);
    }
    devices
        .into_iter()
        .map(|device| {
            project(device, params, provider, solver)
                .map(|projection| ComparisonRow { device, projection })
                .map_err(|source| ComparisonError::Projection {
                    device: device.id.to_string(),
                    source,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ids: &[&str]) -> Result<Vec<ComparisonRow>, ComparisonError> {
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        compare_ids(
            &ids,
            &ProjectionParams::default(),
            &ProviderCostSettings::default(),
            &IrrSettings::default(),
        )
    }

    #[test]
    fn four_devices_is_too_many() {
        let err = run(&["a40", "l4", "l40", "h200"]).unwrap_err();
        assert_eq!(
            err,
            ComparisonError::TooMany {
                requested: 4,
                max: MAX_COMPARED
            }
        );
    }

    #[test]
    fn duplicates_are_rejected() {
        assert!(matches!(
            run(&["a40", "A40"]),
            Err(ComparisonError::Duplicate(_))
        ));
    }

    #[test]
    fn unknown_id_is_reported() {
        assert_eq!(
            run(&["not-a-gpu"]).unwrap_err(),
            ComparisonError::UnknownDevice("not-a-gpu".into())
        );
    }

    #[test]
    fn rows_keep_request_order() {
        let rows = run(&["h200", "a40"]).unwrap();
        assert_eq!(rows[0].device.id, "h200");
        assert_eq!(rows[1].device.id, "a40");
        assert!(rows[0].projection.total_owner_revenue > rows[1].projection.total_owner_revenue);
    }
}
