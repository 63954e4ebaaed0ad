//! 현금흐름의 내부수익률(IRR)을 Newton-Raphson으로 구한다.
//!
//! 여러 초기 추정값에서 차례로 반복을 시작하고, 모두 실패하면 수렴 실패를 돌려준다.
//! 초기 지출 이후 양(+)의 현금흐름이 하나도 없으면 반복 없이 "회수 불가"로 판정한다.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 도함수 크기가 이보다 작으면 해당 추정값을 포기한다.
const DERIVATIVE_FLOOR: f64 = 1e-12;

/// 회수 불가를 나타내는 예약 수익률(-100%).
pub const NEVER_RECOVERS_RATE: f64 = -1.0;

/// 솔버 설정. 사용자 입력이 아니라 설정 파일의 상수로 다룬다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrSettings {
    pub tolerance: f64,
    pub max_iterations: u32,
    /// 순서대로 시도하는 초기 수익률 추정값
    pub initial_guesses: Vec<f64>,
}

impl Default for IrrSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            initial_guesses: vec![0.05, 0.10, 0.15, 0.20, 0.25, 0.30],
        }
    }
}

/// IRR 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "rate", rename_all = "snake_case")]
pub enum IrrOutcome {
    /// 기간당 수익률
    Rate(f64),
    /// 초기 지출 이후 양의 현금흐름이 없음
    NeverRecovers,
    /// 모든 초기 추정값에서 수렴 실패
    NonConvergent,
    /// 현금흐름이 2개 미만
    Undefined,
}

impl IrrOutcome {
    /// 수치로 표현 가능한 수익률. 회수 불가는 예약값 -1을 돌려준다.
    pub fn as_rate(&self) -> Option<f64> {
        match self {
            IrrOutcome::Rate(r) => Some(*r),
            IrrOutcome::NeverRecovers => Some(NEVER_RECOVERS_RATE),
            IrrOutcome::NonConvergent | IrrOutcome::Undefined => None,
        }
    }

    pub fn is_rate(&self) -> bool {
        matches!(self, IrrOutcome::Rate(_))
    }
}

/// 할인율 `rate`에서의 순현재가치. 0번 항목은 할인하지 않는다.
pub fn npv(cash_flows: &[f64], rate: f64) -> f64 {
    npv_with_derivative(cash_flows, rate).0
}

fn npv_with_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let base = 1.0 + rate;
    let mut value = 0.0;
    let mut derivative = 0.0;
    let mut discount = 1.0;
    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= base;
            // d/dr [cf / (1+r)^t] = -t·cf / (1+r)^(t+1)
            derivative -= t as f64 * cf / (discount * base);
        }
        value += cf / discount;
    }
    (value, derivative)
}

/// 한 초기 추정값에서 Newton 반복을 수행한다.
fn newton_from(cash_flows: &[f64], guess: f64, settings: &IrrSettings) -> Option<f64> {
    let tol = settings.tolerance;
    let mut rate = guess;
    for iteration in 0..settings.max_iterations {
        let (value, derivative) = npv_with_derivative(cash_flows, rate);
        if !value.is_finite() || !derivative.is_finite() {
            return None;
        }
        if value.abs() < tol {
            debug!(guess, iteration, rate, "irr converged on npv");
            return Some(rate);
        }
        if derivative.abs() < DERIVATIVE_FLOOR {
            debug!(guess, iteration, rate, "npv derivative too flat");
            return None;
        }
        let next = rate - value / derivative;
        if !next.is_finite() || next <= -1.0 {
            debug!(guess, iteration, next, "newton step left the valid domain");
            return None;
        }
        if (next - rate).abs() < tol && value.abs() < tol * 10.0 {
            debug!(guess, iteration, rate = next, "irr converged on step size");
            return Some(next);
        }
        rate = next;
    }
    debug!(guess, "iteration cap reached");
    None
}

/// 현금흐름 벡터의 기간당 IRR을 구한다.
///
/// `cash_flows[0]`은 초기 지출(음수), 이후는 기간별 현금흐름이며
/// 잔존가치는 마지막 항목에 더해져 있어야 한다.
pub fn solve_irr(cash_flows: &[f64], settings: &IrrSettings) -> IrrOutcome {
    if cash_flows.len() < 2 {
        return IrrOutcome::Undefined;
    }
    if cash_flows[1..].iter().all(|cf| *cf <= 0.0) {
        return IrrOutcome::NeverRecovers;
    }
    for &guess in &settings.initial_guesses {
        if let Some(rate) = newton_from(cash_flows, guess, settings) {
            return IrrOutcome::Rate(rate);
        }
    }
    warn!(
        periods = cash_flows.len(),
        guesses = settings.initial_guesses.len(),
        "irr did not converge from any initial guess"
    );
    IrrOutcome::NonConvergent
}

/// 월 수익률을 연 복리 수익률로 환산한다. 특수값은 그대로 전달한다.
pub fn annualize(monthly: IrrOutcome) -> IrrOutcome {
    match monthly {
        IrrOutcome::Rate(r) => IrrOutcome::Rate((1.0 + r).powi(12) - 1.0),
        other => other,
    }
}
