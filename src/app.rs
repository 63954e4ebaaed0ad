use thiserror::Error;
use tracing::debug;

use crate::catalog::{self, CardType, DeviceRecord};
use crate::comparison::{self, ComparisonError};
use crate::config::{Config, ConfigError};
use crate::finance::provider_cost::{provider_costs, ProviderCostInput};
use crate::finance::{project, FinanceError, ProjectionParams};
use crate::i18n::Translator;
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 투자 계산 오류
    #[error("계산 오류: {0}")]
    Finance(#[from] FinanceError),
    /// 비교 요청 오류
    #[error("비교 오류: {0}")]
    Comparison(#[from] ComparisonError),
    #[error("알 수 없는 GPU: {0}")]
    UnknownDevice(String),
    #[error("알 수 없는 카드 분류: {0}")]
    UnknownCardType(String),
    /// JSON 출력 오류
    #[error("JSON 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI에서 해석된 실행 명령.
#[derive(Debug, Clone)]
pub enum Command {
    Catalog {
        card_type: Option<String>,
    },
    Project {
        device: String,
        params: ProjectionParams,
        show_schedule: bool,
        json: bool,
    },
    Compare {
        devices: Vec<String>,
        params: ProjectionParams,
        json: bool,
    },
    Costs {
        device: String,
        params: ProjectionParams,
        json: bool,
    },
}

fn lookup(id: &str) -> Result<&'static DeviceRecord, AppError> {
    catalog::find_device(id).ok_or_else(|| AppError::UnknownDevice(id.to_string()))
}

/// 명령 하나를 실행하고 결과를 표준 출력에 쓴다.
pub fn run(command: Command, cfg: &Config, tr: &Translator) -> Result<(), AppError> {
    debug!(?command, "dispatching command");
    match command {
        Command::Catalog { card_type } => {
            match card_type {
                Some(code) => {
                    let kind = CardType::from_code(&code)
                        .ok_or(AppError::UnknownCardType(code))?;
                    ui_cli::print_catalog(tr, catalog::devices_by_type(kind));
                }
                None => ui_cli::print_catalog(tr, catalog::devices().iter()),
            }
            Ok(())
        }
        Command::Project {
            device,
            params,
            show_schedule,
            json,
        } => {
            let device = lookup(&device)?;
            let projection = project(device, &params, &cfg.provider_costs, &cfg.solver)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                ui_cli::print_projection(tr, &projection, params.opex_bearer, show_schedule);
            }
            Ok(())
        }
        Command::Compare {
            devices,
            params,
            json,
        } => {
            let rows =
                comparison::compare_ids(&devices, &params, &cfg.provider_costs, &cfg.solver)?;
            if json {
                let projections: Vec<_> = rows.iter().map(|row| &row.projection).collect();
                println!("{}", serde_json::to_string_pretty(&projections)?);
            } else {
                ui_cli::print_comparison(tr, &rows);
            }
            Ok(())
        }
        Command::Costs {
            device,
            params,
            json,
        } => {
            let device = lookup(&device)?;
            let mix = params.utilization.normalize()?;
            let costs = provider_costs(&ProviderCostInput {
                settings: cfg.provider_costs.clone(),
                power_active_w: device.power_active_w,
                power_idle_w: device.power_idle_w,
                idle_fraction: mix.idle,
                duration_years: params.duration_years,
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&costs)?);
            } else {
                ui_cli::print_costs(tr, device, &costs);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_device_is_an_error() {
        let cfg = Config::default();
        let tr = Translator::new("en-us");
        let err = run(
            Command::Costs {
                device: "gtx-480".into(),
                params: ProjectionParams::default(),
                json: true,
            },
            &cfg,
            &tr,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::UnknownDevice(id) if id == "gtx-480"));
    }

    #[test]
    fn unknown_card_type_is_an_error() {
        let cfg = Config::default();
        let tr = Translator::new("ko");
        let err = run(
            Command::Catalog {
                card_type: Some("mainframe".into()),
            },
            &cfg,
            &tr,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::UnknownCardType(_)));
    }

    #[test]
    fn overlong_contract_is_a_finance_error() {
        let cfg = Config::default();
        let tr = Translator::new("en-us");
        let params = ProjectionParams {
            duration_years: 400_000_000,
            ..ProjectionParams::default()
        };
        let err = run(
            Command::Project {
                device: "a40".into(),
                params,
                show_schedule: false,
                json: true,
            },
            &cfg,
            &tr,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Finance(FinanceError::InvalidInput(_))));
    }
}
