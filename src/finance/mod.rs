//! GPU 임대 투자 경제성 계산 모듈 모음.
//! 월별 수익 스케줄, 회수 시점, IRR, 운영비, 시나리오 통합 계산으로 구성한다.

pub mod error;
pub mod irr;
pub mod projection;
pub mod provider_cost;
pub mod rates;
pub mod schedule;
pub mod utilization;

pub use error::*;
pub use irr::*;
pub use projection::*;
pub use schedule::*;
