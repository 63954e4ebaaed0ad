use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::DeviceRecord;

/// 호스팅 방식. 방식별로 임대 요율 티어가 다르다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HostingMode {
    Community,
    #[default]
    Secure,
}

/// 실제 사용한 요율이 어디서 왔는지 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// 요청한 호스팅 방식의 요율을 그대로 사용
    Requested,
    /// 시큐어 요율이 없어 커뮤니티 요율로 대체
    CommunityFallback,
    /// 사용할 요율이 없어 0으로 처리
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedRate {
    /// 시간당 요율 [USD/h]
    pub rate: f64,
    pub source: RateSource,
}

/// 스팟/온디맨드 두 티어의 확정 요율.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedRates {
    pub mode: HostingMode,
    pub spot: ResolvedRate,
    pub on_demand: ResolvedRate,
}

impl ResolvedRates {
    /// 어느 한 티어라도 요청한 방식의 요율을 쓰지 못했으면 true.
    pub fn used_fallback(&self) -> bool {
        self.spot.source != RateSource::Requested || self.on_demand.source != RateSource::Requested
    }
}

impl DeviceRecord {
    /// 시큐어 티어가 하나라도 제공되는지 여부.
    pub fn secure_available(&self) -> bool {
        self.secure_spot.is_some() || self.secure_on_demand.is_some()
    }
}

fn resolve_tier(requested: Option<f64>, community: Option<f64>, mode: HostingMode) -> ResolvedRate {
    match (requested, mode) {
        (Some(rate), _) => ResolvedRate {
            rate,
            source: RateSource::Requested,
        },
        (None, HostingMode::Secure) => match community {
            Some(rate) => ResolvedRate {
                rate,
                source: RateSource::CommunityFallback,
            },
            None => ResolvedRate {
                rate: 0.0,
                source: RateSource::Unavailable,
            },
        },
        (None, HostingMode::Community) => ResolvedRate {
            rate: 0.0,
            source: RateSource::Unavailable,
        },
    }
}

/// 호스팅 방식에 맞는 요율을 고른다. 시큐어 → 커뮤니티 → 0 순으로 폴백한다.
pub fn resolve_rates(device: &DeviceRecord, mode: HostingMode) -> ResolvedRates {
    let (spot, on_demand) = match mode {
        HostingMode::Secure => (device.secure_spot, device.secure_on_demand),
        HostingMode::Community => (device.community_spot, device.community_on_demand),
    };
    let resolved = ResolvedRates {
        mode,
        spot: resolve_tier(spot, device.community_spot, mode),
        on_demand: resolve_tier(on_demand, device.community_on_demand, mode),
    };
    if resolved.used_fallback() {
        warn!(
            device = device.id,
            ?mode,
            spot = ?resolved.spot.source,
            on_demand = ?resolved.on_demand.source,
            "requested pricing tier missing, using fallback rates"
        );
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find_device, CardType};

    fn community_only() -> DeviceRecord {
        DeviceRecord {
            id: "test-community",
            name: "Test Community Only",
            card_type: CardType::Consumer,
            price: 1_000.0,
            community_spot: Some(0.2),
            community_on_demand: None,
            secure_spot: None,
            secure_on_demand: None,
            power_active_w: 300.0,
            power_idle_w: 20.0,
            memory_gb: 24,
            vcpu: 8,
        }
    }

    #[test]
    fn catalog_device_uses_requested_tier() {
        let dev = find_device("a100-80gb-pcie").unwrap();
        let r = resolve_rates(dev, HostingMode::Secure);
        assert_eq!(r.on_demand.rate, 1.64);
        assert!(!r.used_fallback());
    }

    #[test]
    fn secure_falls_back_to_community() {
        let r = resolve_rates(&community_only(), HostingMode::Secure);
        assert_eq!(r.spot.source, RateSource::CommunityFallback);
        assert_eq!(r.spot.rate, 0.2);
        assert_eq!(r.on_demand.source, RateSource::Unavailable);
        assert_eq!(r.on_demand.rate, 0.0);
        assert!(r.used_fallback());
    }

    #[test]
    fn community_missing_tier_is_zero() {
        let r = resolve_rates(&community_only(), HostingMode::Community);
        assert_eq!(r.spot.source, RateSource::Requested);
        assert_eq!(r.on_demand.source, RateSource::Unavailable);
        assert!(!community_only().secure_available());
    }
}
