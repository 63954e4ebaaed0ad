//! GPU 모델별 가격/임대 요율/전력 참고 테이블을 제공한다.
//! 요율은 시장 조사 시점의 시간당 USD 기준이며 실제 계약 전 최신 시세로 검증해야 한다.

use serde::Serialize;

/// 카드 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardType {
    DataCenter,
    Workstation,
    Consumer,
}

impl CardType {
    pub fn label(&self) -> &'static str {
        match self {
            CardType::DataCenter => "Data Center",
            CardType::Workstation => "Workstation",
            CardType::Consumer => "Consumer",
        }
    }

    /// `data-center`, `workstation`, `consumer` 등 코드 문자열을 해석한다.
    pub fn from_code(code: &str) -> Option<Self> {
        let c = code.trim().to_lowercase().replace(['_', ' '], "-");
        match c.as_str() {
            "data-center" | "datacenter" | "dc" => Some(CardType::DataCenter),
            "workstation" | "ws" => Some(CardType::Workstation),
            "consumer" => Some(CardType::Consumer),
            _ => None,
        }
    }
}

/// GPU 한 종의 경제성 참고 데이터. 엔진은 읽기만 한다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub card_type: CardType,
    /// 구매 가격 [USD]
    pub price: f64,
    /// 커뮤니티 호스팅 스팟 요율 [USD/h]
    pub community_spot: Option<f64>,
    /// 커뮤니티 호스팅 온디맨드 요율 [USD/h]
    pub community_on_demand: Option<f64>,
    /// 시큐어 호스팅 스팟 요율 [USD/h]
    pub secure_spot: Option<f64>,
    /// 시큐어 호스팅 온디맨드 요율 [USD/h]
    pub secure_on_demand: Option<f64>,
    /// 부하 시 소비 전력 [W]
    pub power_active_w: f64,
    /// 유휴 시 소비 전력 [W]
    pub power_idle_w: f64,
    pub memory_gb: u32,
    pub vcpu: u32,
}

pub fn devices() -> &'static [DeviceRecord] {
    DEVICES
}

pub fn find_device(id: &str) -> Option<&'static DeviceRecord> {
    DEVICES
        .iter()
        .find(|d| d.id.eq_ignore_ascii_case(id) || d.name.eq_ignore_ascii_case(id))
}

pub fn devices_by_type(card_type: CardType) -> impl Iterator<Item = &'static DeviceRecord> {
    DEVICES.iter().filter(move |d| d.card_type == card_type)
}

#[allow(clippy::too_many_arguments)]
const fn dev(
    id: &'static str,
    name: &'static str,
    card_type: CardType,
    price: f64,
    spot: f64,
    on_demand: f64,
    power_active_w: f64,
    power_idle_w: f64,
    memory_gb: u32,
    vcpu: u32,
) -> DeviceRecord {
    DeviceRecord {
        id,
        name,
        card_type,
        price,
        community_spot: Some(spot),
        community_on_demand: Some(on_demand),
        secure_spot: Some(spot),
        secure_on_demand: Some(on_demand),
        power_active_w,
        power_idle_w,
        memory_gb,
        vcpu,
    }
}

use CardType::{Consumer, DataCenter, Workstation};

const DEVICES: &[DeviceRecord] = &[
    dev("a100-80gb-pcie", "NVIDIA A100 80GB PCIe", DataCenter, 15_000.0, 0.820, 1.640, 400.0, 50.0, 117, 8),
    dev("a100-sxm4-80gb", "NVIDIA A100-SXM4-80GB", DataCenter, 16_000.0, 0.950, 1.890, 400.0, 50.0, 125, 16),
    dev("a40", "NVIDIA A40", DataCenter, 4_000.0, 0.280, 0.440, 300.0, 30.0, 50, 9),
    dev("h100-80gb-hbm3", "NVIDIA H100 80GB HBM3", DataCenter, 28_000.0, 1.750, 2.990, 700.0, 60.0, 125, 16),
    dev("h100-nvl", "NVIDIA H100 NVL", DataCenter, 29_000.0, 1.650, 2.790, 700.0, 60.0, 94, 16),
    dev("h100-pcie", "NVIDIA H100 PCIe", DataCenter, 27_000.0, 1.250, 2.390, 700.0, 60.0, 188, 24),
    dev("h200", "NVIDIA H200", DataCenter, 30_000.0, 2.275, 3.857, 700.0, 60.0, 188, 12),
    dev("l4", "NVIDIA L4", DataCenter, 5_000.0, 0.220, 0.430, 300.0, 30.0, 50, 12),
    dev("l40", "NVIDIA L40", DataCenter, 7_000.0, 0.500, 0.990, 300.0, 30.0, 94, 8),
    dev("l40s", "NVIDIA L40S", DataCenter, 8_250.0, 0.430, 0.860, 300.0, 30.0, 62, 16),
    dev("rtx-3090", "NVIDIA GeForce RTX 3090", Consumer, 2_000.0, 0.220, 0.430, 350.0, 25.0, 62, 16),
    dev("rtx-4090", "NVIDIA GeForce RTX 4090", Consumer, 4_100.0, 0.350, 0.690, 450.0, 30.0, 41, 6),
    dev("rtx-5090", "NVIDIA GeForce RTX 5090", Consumer, 5_000.0, 0.455, 0.897, 575.0, 35.0, 46, 16),
    dev("rtx-2000-ada", "NVIDIA RTX 2000 Ada Generation", Workstation, 1_000.0, 0.140, 0.280, 130.0, 10.0, 31, 6),
    dev("rtx-4000-ada", "NVIDIA RTX 4000 Ada Generation", Workstation, 1_500.0, 0.190, 0.380, 130.0, 10.0, 47, 9),
    dev("rtx-6000-ada", "NVIDIA RTX 6000 Ada Generation", Workstation, 7_600.0, 0.390, 0.770, 300.0, 25.0, 62, 16),
    dev("rtx-a4000", "NVIDIA RTX A4000", Workstation, 700.0, 0.160, 0.320, 140.0, 15.0, 31, 5),
    dev("rtx-a4500", "NVIDIA RTX A4500", Workstation, 1_000.0, 0.180, 0.340, 230.0, 20.0, 31, 12),
    dev("rtx-a5000", "NVIDIA RTX A5000", Workstation, 1_200.0, 0.140, 0.290, 230.0, 20.0, 25, 9),
    dev("rtx-a6000", "NVIDIA RTX A6000", Workstation, 2_500.0, 0.330, 0.590, 300.0, 28.0, 50, 8),
];
