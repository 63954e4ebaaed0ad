use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const NOT_AVAILABLE: &str = "general.not_available";

    pub const CATALOG_HEADING: &str = "catalog.heading";
    pub const CATALOG_COLUMNS: &str = "catalog.columns";
    pub const CATALOG_UNKNOWN_TYPE: &str = "catalog.unknown_type";

    pub const REPORT_HEADING: &str = "report.heading";
    pub const REPORT_HOSTING_MODE: &str = "report.hosting_mode";
    pub const REPORT_FALLBACK_WARNING: &str = "report.fallback_warning";
    pub const REPORT_TIER_SPOT: &str = "report.tier_spot";
    pub const REPORT_TIER_ON_DEMAND: &str = "report.tier_on_demand";
    pub const RATE_SOURCE_REQUESTED: &str = "rate_source.requested";
    pub const RATE_SOURCE_COMMUNITY_FALLBACK: &str = "rate_source.community_fallback";
    pub const RATE_SOURCE_UNAVAILABLE: &str = "rate_source.unavailable";
    pub const REPORT_EFFECTIVE_RATE: &str = "report.effective_rate";
    pub const REPORT_INITIAL_INVESTMENT: &str = "report.initial_investment";
    pub const REPORT_OWNER_OPEX: &str = "report.owner_opex";
    pub const REPORT_TCO: &str = "report.tco";
    pub const REPORT_GROSS_REVENUE: &str = "report.gross_revenue";
    pub const REPORT_PLATFORM_FEE: &str = "report.platform_fee";
    pub const REPORT_OWNER_REVENUE: &str = "report.owner_revenue";
    pub const REPORT_PROVIDER_REVENUE: &str = "report.provider_revenue";
    pub const REPORT_ANNUAL_OWNER_REVENUE: &str = "report.annual_owner_revenue";
    pub const REPORT_RESIDUAL_VALUE: &str = "report.residual_value";
    pub const REPORT_ROI: &str = "report.roi";
    pub const REPORT_ANNUAL_ROI: &str = "report.annual_roi";
    pub const REPORT_PAYBACK: &str = "report.payback";
    pub const REPORT_PAYBACK_NOT_REACHED: &str = "report.payback_not_reached";
    pub const REPORT_IRR_ANNUAL: &str = "report.irr_annual";
    pub const REPORT_IRR_PERIODIC: &str = "report.irr_periodic";
    pub const REPORT_IRR_NEVER_RECOVERS: &str = "report.irr_never_recovers";
    pub const REPORT_IRR_NON_CONVERGENT: &str = "report.irr_non_convergent";
    pub const REPORT_YEARLY_HEADING: &str = "report.yearly_heading";
    pub const REPORT_YEAR: &str = "report.year";
    pub const REPORT_OPEX_PROVIDER_NOTE: &str = "report.opex_provider_note";

    pub const SCHEDULE_HEADING: &str = "schedule.heading";
    pub const SCHEDULE_COLUMNS: &str = "schedule.columns";

    pub const COMPARE_HEADING: &str = "compare.heading";
    pub const COMPARE_COLUMNS: &str = "compare.columns";

    pub const COSTS_HEADING: &str = "costs.heading";
    pub const COSTS_WEIGHTED_POWER: &str = "costs.weighted_power";
    pub const COSTS_POWER: &str = "costs.power";
    pub const COSTS_RACK: &str = "costs.rack";
    pub const COSTS_NETWORK: &str = "costs.network";
    pub const COSTS_TOTAL_YEAR: &str = "costs.total_year";
    pub const COSTS_PER_HOUR: &str = "costs.per_hour";
    pub const COSTS_PER_MONTH: &str = "costs.per_month";
    pub const COSTS_CONTRACT_TOTAL: &str = "costs.contract_total";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾고, 영어가 없으면 한국어로 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    lang.split_once(['-', '_'])
        .and_then(|(base, _)| try_load(base))
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        NOT_AVAILABLE => "N/A",
        CATALOG_HEADING => "\n=== GPU 카탈로그 ===",
        CATALOG_COLUMNS => "ID                  이름                              분류          가격($)   스팟($/h) 온디맨드($/h)  전력(W)",
        CATALOG_UNKNOWN_TYPE => "알 수 없는 카드 분류입니다 (data-center/workstation/consumer).",
        REPORT_HEADING => "\n=== GPU 투자 분석 ===",
        REPORT_HOSTING_MODE => "호스팅 방식",
        REPORT_FALLBACK_WARNING => "주의: 요청한 호스팅 방식의 요율이 없어 대체 요율을 사용했습니다.",
        REPORT_TIER_SPOT => "  스팟 요율",
        REPORT_TIER_ON_DEMAND => "  온디맨드 요율",
        RATE_SOURCE_REQUESTED => "요청 방식 요율",
        RATE_SOURCE_COMMUNITY_FALLBACK => "커뮤니티 요율로 대체",
        RATE_SOURCE_UNAVAILABLE => "요율 없음, 0으로 처리",
        REPORT_EFFECTIVE_RATE => "실효 시간당 요율",
        REPORT_INITIAL_INVESTMENT => "초기 투자",
        REPORT_OWNER_OPEX => "소유자 부담 운영비",
        REPORT_TCO => "총소유비용(TCO)",
        REPORT_GROSS_REVENUE => "총 임대 수익",
        REPORT_PLATFORM_FEE => "플랫폼 수수료",
        REPORT_OWNER_REVENUE => "소유자 수익",
        REPORT_PROVIDER_REVENUE => "호스팅 사업자 수익",
        REPORT_ANNUAL_OWNER_REVENUE => "연간 소유자 수익",
        REPORT_RESIDUAL_VALUE => "잔존가치",
        REPORT_ROI => "투자수익률(ROI)",
        REPORT_ANNUAL_ROI => "연간 ROI",
        REPORT_PAYBACK => "회수 기간",
        REPORT_PAYBACK_NOT_REACHED => "계약 기간 내 미회수",
        REPORT_IRR_ANNUAL => "IRR(연)",
        REPORT_IRR_PERIODIC => "IRR(기간)",
        REPORT_IRR_NEVER_RECOVERS => "회수 불가 (-100%)",
        REPORT_IRR_NON_CONVERGENT => "수렴 실패",
        REPORT_YEARLY_HEADING => "\n-- 연차별 소유자 수익 --",
        REPORT_YEAR => "년차",
        REPORT_OPEX_PROVIDER_NOTE => "운영비는 호스팅 사업자가 부담하며 소유자는 초기 구매비만 부담합니다.",
        SCHEDULE_HEADING => "\n-- 월별 수익 스케줄 --",
        SCHEDULE_COLUMNS => "월     요율($/h)  총수익($)    소유자수익($)  누적($)",
        COMPARE_HEADING => "\n=== GPU 비교 ===",
        COMPARE_COLUMNS => "이름                              가격($)    연간수익($)  ROI(%)   회수(월)  IRR(연)",
        COSTS_HEADING => "\n=== 호스팅 운영비 (GPU 1대) ===",
        COSTS_WEIGHTED_POWER => "가중 평균 전력",
        COSTS_POWER => "전력비/년",
        COSTS_RACK => "랙 비용/년",
        COSTS_NETWORK => "네트워크/년",
        COSTS_TOTAL_YEAR => "합계/년",
        COSTS_PER_HOUR => "시간당",
        COSTS_PER_MONTH => "월간",
        COSTS_CONTRACT_TOTAL => "계약 기간 합계",
        _ => "?",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        NOT_AVAILABLE => "N/A",
        CATALOG_HEADING => "\n=== GPU Catalog ===",
        CATALOG_COLUMNS => "ID                  Name                              Type          Price($)  Spot($/h) OnDemand($/h)  Power(W)",
        CATALOG_UNKNOWN_TYPE => "Unknown card type (data-center/workstation/consumer).",
        REPORT_HEADING => "\n=== GPU Investment Analysis ===",
        REPORT_HOSTING_MODE => "Hosting mode",
        REPORT_FALLBACK_WARNING => "Note: requested hosting tier unavailable, fallback rates were used.",
        REPORT_TIER_SPOT => "  Spot rate",
        REPORT_TIER_ON_DEMAND => "  On-demand rate",
        RATE_SOURCE_REQUESTED => "requested tier",
        RATE_SOURCE_COMMUNITY_FALLBACK => "community tier used",
        RATE_SOURCE_UNAVAILABLE => "no rate, counted as zero",
        REPORT_EFFECTIVE_RATE => "Effective hourly rate",
        REPORT_INITIAL_INVESTMENT => "Initial investment",
        REPORT_OWNER_OPEX => "Owner-paid opex",
        REPORT_TCO => "Total cost of ownership",
        REPORT_GROSS_REVENUE => "Gross rental revenue",
        REPORT_PLATFORM_FEE => "Platform fee",
        REPORT_OWNER_REVENUE => "Owner revenue",
        REPORT_PROVIDER_REVENUE => "Provider revenue",
        REPORT_ANNUAL_OWNER_REVENUE => "Annual owner revenue",
        REPORT_RESIDUAL_VALUE => "Residual value",
        REPORT_ROI => "Return on investment",
        REPORT_ANNUAL_ROI => "Annual ROI",
        REPORT_PAYBACK => "Payback period",
        REPORT_PAYBACK_NOT_REACHED => "not reached within contract",
        REPORT_IRR_ANNUAL => "IRR (annual)",
        REPORT_IRR_PERIODIC => "IRR (periodic)",
        REPORT_IRR_NEVER_RECOVERS => "never recovers (-100%)",
        REPORT_IRR_NON_CONVERGENT => "did not converge",
        REPORT_YEARLY_HEADING => "\n-- Owner revenue by contract year --",
        REPORT_YEAR => "Year",
        REPORT_OPEX_PROVIDER_NOTE => "Operating expenses are paid by the provider; the owner only pays the initial GPU cost.",
        SCHEDULE_HEADING => "\n-- Monthly revenue schedule --",
        SCHEDULE_COLUMNS => "Month  Rate($/h)  Gross($)     Owner($)       Cumulative($)",
        COMPARE_HEADING => "\n=== GPU Comparison ===",
        COMPARE_COLUMNS => "Name                              Price($)   Annual($)    ROI(%)   Payback  IRR(yr)",
        COSTS_HEADING => "\n=== Provider Operating Costs (per GPU) ===",
        COSTS_WEIGHTED_POWER => "Weighted power draw",
        COSTS_POWER => "Power / year",
        COSTS_RACK => "Rack space / year",
        COSTS_NETWORK => "Network / year",
        COSTS_TOTAL_YEAR => "Total / year",
        COSTS_PER_HOUR => "Per hour",
        COSTS_PER_MONTH => "Per month",
        COSTS_CONTRACT_TOTAL => "Contract total",
        _ => return None,
    })
}
