//! gpu_investment_toolbox: GPU 호스팅 투자 경제성 계산 CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gpu_investment_toolbox::app::{self, AppError, Command};
use gpu_investment_toolbox::config;
use gpu_investment_toolbox::finance::rates::HostingMode;
use gpu_investment_toolbox::finance::{IrrPeriod, OpexBearer, ProjectionParams};
use gpu_investment_toolbox::i18n::{self, keys, Translator};
use tracing_subscriber::EnvFilter;

/// GPU hosting investment calculator.
#[derive(Parser)]
#[command(name = "gpu_investment_toolbox")]
#[command(version, about = "Cash-flow projection, payback and IRR for hosted GPUs.")]
struct Cli {
    /// Path to config file (default: ./config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output language (ko, en-us). Overrides the config file.
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Log filter used when RUST_LOG is unset (e.g. debug, warn).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog GPUs.
    Catalog {
        /// Filter by card type (data-center, workstation, consumer).
        #[arg(long)]
        card_type: Option<String>,
    },
    /// Project revenue, payback and IRR for one GPU.
    Project {
        /// Catalog id or name.
        device: String,
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Print the month-by-month schedule.
        #[arg(long)]
        schedule: bool,
        #[arg(long)]
        json: bool,
    },
    /// Compare up to three GPUs under the same scenario.
    Compare {
        #[arg(required = true, num_args = 1..)]
        devices: Vec<String>,
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[arg(long)]
        json: bool,
    },
    /// Show the provider's operating costs for one GPU.
    Costs {
        device: String,
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[arg(long)]
        json: bool,
    },
}

/// Scenario overrides on top of `[scenario]` in the config file.
#[derive(Args, Default)]
struct ScenarioArgs {
    #[arg(long)]
    years: Option<u32>,
    #[arg(long, value_enum)]
    mode: Option<HostingMode>,
    /// Idle share (weights are normalized).
    #[arg(long)]
    idle: Option<f64>,
    #[arg(long)]
    spot: Option<f64>,
    #[arg(long)]
    on_demand: Option<f64>,
    /// Platform fee fraction (0..1).
    #[arg(long)]
    platform_fee: Option<f64>,
    /// Owner share after the fee (0..1).
    #[arg(long)]
    owner_share: Option<f64>,
    /// Monthly rate decay fraction (0..1).
    #[arg(long)]
    decay: Option<f64>,
    /// Residual value as a fraction of purchase price.
    #[arg(long)]
    residual: Option<f64>,
    /// Shared infrastructure cost per unit [USD].
    #[arg(long)]
    infra_cost: Option<f64>,
    #[arg(long, value_enum)]
    opex: Option<OpexBearer>,
    #[arg(long, value_enum)]
    irr_period: Option<IrrPeriod>,
}

impl ScenarioArgs {
    fn apply(&self, base: &ProjectionParams) -> ProjectionParams {
        let mut p = base.clone();
        if let Some(v) = self.years {
            p.duration_years = v;
        }
        if let Some(mode) = self.mode {
            p.hosting_mode = mode;
        }
        if let Some(v) = self.idle {
            p.utilization.idle = v;
        }
        if let Some(v) = self.spot {
            p.utilization.spot = v;
        }
        if let Some(v) = self.on_demand {
            p.utilization.on_demand = v;
        }
        if let Some(v) = self.platform_fee {
            p.platform_fee = v;
        }
        if let Some(v) = self.owner_share {
            p.owner_share = v;
        }
        if let Some(v) = self.decay {
            p.monthly_decay = v;
        }
        if let Some(v) = self.residual {
            p.residual_fraction = v;
        }
        if let Some(v) = self.infra_cost {
            p.infrastructure_cost_per_unit = v;
        }
        if let Some(bearer) = self.opex {
            p.opex_bearer = bearer;
        }
        if let Some(period) = self.irr_period {
            p.irr_period = period;
        }
        p
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cfg = match config::load_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("오류: {err}");
            std::process::exit(1);
        }
    };
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, None);

    let base = &cfg.scenario;
    let command = match cli.command {
        Commands::Catalog { card_type } => Command::Catalog { card_type },
        Commands::Project {
            device,
            scenario,
            schedule,
            json,
        } => Command::Project {
            device,
            params: scenario.apply(base),
            show_schedule: schedule,
            json,
        },
        Commands::Compare {
            devices,
            scenario,
            json,
        } => Command::Compare {
            devices,
            params: scenario.apply(base),
            json,
        },
        Commands::Costs {
            device,
            scenario,
            json,
        } => Command::Costs {
            device,
            params: scenario.apply(base),
            json,
        },
    };

    if let Err(err) = app::run(command, &cfg, &tr) {
        match err {
            AppError::UnknownCardType(_) => {
                eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.t(keys::CATALOG_UNKNOWN_TYPE))
            }
            other => eprintln!("{}: {other}", tr.t(keys::ERROR_PREFIX)),
        }
        std::process::exit(1);
    }
}
