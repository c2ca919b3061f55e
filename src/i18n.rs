use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SIZING: &str = "main_menu.sizing";
    pub const MAIN_MENU_ATTENUATION: &str = "main_menu.attenuation";
    pub const MAIN_MENU_PRESSURE_LOSS: &str = "main_menu.pressure_loss";
    pub const MAIN_MENU_REGENERATED: &str = "main_menu.regenerated";
    pub const MAIN_MENU_PRICE: &str = "main_menu.price";
    pub const MAIN_MENU_TABLES: &str = "main_menu.tables";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const PROMPT_DEFAULT_HINT: &str = "prompt.default_hint";
    pub const PROMPT_WIDTH: &str = "prompt.width";
    pub const PROMPT_HEIGHT: &str = "prompt.height";
    pub const PROMPT_DEPTH: &str = "prompt.depth";
    pub const PROMPT_THICKNESS: &str = "prompt.thickness";
    pub const PROMPT_BAFFLE_COUNT: &str = "prompt.baffle_count";
    pub const PROMPT_FLOW: &str = "prompt.flow";
    pub const PROMPT_UPSTREAM: &str = "prompt.upstream";

    pub const REPORT_MODEL: &str = "report.model";
    pub const REPORT_GAP: &str = "report.gap";
    pub const REPORT_FREE_AREA: &str = "report.free_area";
    pub const REPORT_VELOCITY: &str = "report.velocity";
    pub const REPORT_GAP_INVALID: &str = "report.gap_invalid";
    pub const REPORT_VELOCITY_EXCEEDED: &str = "report.velocity_exceeded";
    pub const REPORT_PROCEED: &str = "report.proceed";
    pub const REPORT_ATTENUATION: &str = "report.attenuation";
    pub const REPORT_ATTENUATION_GLOBAL: &str = "report.attenuation_global";
    pub const REPORT_PRESSURE_LOSS: &str = "report.pressure_loss";
    pub const REPORT_ZETA: &str = "report.zeta";
    pub const REPORT_DELTA_P: &str = "report.delta_p";
    pub const REPORT_REGENERATED: &str = "report.regenerated";
    pub const REPORT_LW_GLOBAL: &str = "report.lw_global";
    pub const REPORT_LWA_GLOBAL: &str = "report.lwa_global";
    pub const REPORT_DOWNSTREAM: &str = "report.downstream";
    pub const REPORT_UPSTREAM_GLOBAL: &str = "report.upstream_global";
    pub const REPORT_DOWNSTREAM_GLOBAL: &str = "report.downstream_global";

    pub const PRICE_HEADING: &str = "price.heading";
    pub const PRICE_BOX: &str = "price.box";
    pub const PRICE_BAFFLES: &str = "price.baffles";
    pub const PRICE_LATERAL: &str = "price.lateral";
    pub const PRICE_MATERIALS: &str = "price.materials";
    pub const PRICE_LABOR: &str = "price.labor";
    pub const PRICE_INDIRECT: &str = "price.indirect";
    pub const PRICE_MARGIN: &str = "price.margin";
    pub const PRICE_FINAL: &str = "price.final";
    pub const PRICE_TOTAL: &str = "price.total";

    pub const TABLES_HEADING: &str = "tables.heading";
    pub const TABLES_ATTENUATION: &str = "tables.attenuation";
    pub const TABLES_PRESSURE_LOSS: &str = "tables.pressure_loss";
    pub const TABLES_BOX_PRICES: &str = "tables.box_prices";
    pub const TABLES_BAFFLE_PRICES: &str = "tables.baffle_prices";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_PROMPT_UNITS: &str = "settings.prompt_units";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const CONFIG_WRITTEN: &str = "settings.config_written";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("en") {
            Language::En
        } else {
            Language::Ko
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
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides(Path::new("locales"), lang_code));
        if overrides.is_some() {
            log::debug!("언어팩 로드: {lang_code}");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.lookup(key) {
            return v;
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
        "ko" | "ko-kr" | "en" | "en-us" => Some(c.clone()),
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
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    get_locale()
        .and_then(|loc| normalize_locale_string(&loc))
        .or_else(|| {
            ["LC_ALL", "LANG"]
                .into_iter()
                .filter_map(|var| std::env::var(var).ok())
                .find_map(|v| normalize_locale_string(&v))
        })
}

/// TOML 기반 언어팩을 로드한다. 중첩 테이블은 `a.b` 형태의 키로 펼친다.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let content = fs::read_to_string(dir.join(format!("{code}.toml"))).ok()?;
        parse_toml_to_map(&content)
    };

    // en-us → en 순
    try_load(lang).or_else(|| {
        lang.split_once(['-', '_'])
            .and_then(|(base, _)| try_load(base))
    })
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = match toml::from_str(src) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("언어팩 파싱 실패: {e}");
            return None;
        }
    };
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
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Baffle Silencer Toolbox ===",
        MAIN_MENU_SIZING => "1) 전체 사이징",
        MAIN_MENU_ATTENUATION => "2) 삽입손실",
        MAIN_MENU_PRESSURE_LOSS => "3) 압력손실",
        MAIN_MENU_REGENERATED => "4) 자생소음",
        MAIN_MENU_PRICE => "5) 판매가",
        MAIN_MENU_TABLES => "6) 참조표 보기",
        MAIN_MENU_SETTINGS => "7) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        PROMPT_DEFAULT_HINT => "엔터 = 기본값",
        PROMPT_WIDTH => "폭 W",
        PROMPT_HEIGHT => "높이 H",
        PROMPT_DEPTH => "길이 L",
        PROMPT_THICKNESS => "배플 두께 d",
        PROMPT_BAFFLE_COUNT => "배플 개수 n",
        PROMPT_FLOW => "풍량 Q",
        PROMPT_UPSTREAM => "상류 스펙트럼 63~8k Hz 8개 값 [dB] ('-' = 없음, 엔터 = 생략): ",
        REPORT_MODEL => "모델 코드",
        REPORT_GAP => "간극 s",
        REPORT_FREE_AREA => "자유 면적",
        REPORT_VELOCITY => "간극 유속",
        REPORT_GAP_INVALID => "경고: 배플이 폭을 모두 채웁니다(간극 ≤ 0).",
        REPORT_VELOCITY_EXCEEDED => "경고: 간극 유속이 허용치를 초과합니다.",
        REPORT_PROCEED => "설계 검증 통과",
        REPORT_ATTENUATION => "\n-- 삽입손실 --",
        REPORT_ATTENUATION_GLOBAL => "전체 삽입손실",
        REPORT_PRESSURE_LOSS => "\n-- 압력손실 --",
        REPORT_ZETA => "저항계수 ζ",
        REPORT_DELTA_P => "압력손실 Δp",
        REPORT_REGENERATED => "\n-- 자생소음 --",
        REPORT_LW_GLOBAL => "음향파워 L_w",
        REPORT_LWA_GLOBAL => "A-가중 L_wA",
        REPORT_DOWNSTREAM => "\n-- 하류 소음 --",
        REPORT_UPSTREAM_GLOBAL => "상류 전체 레벨",
        REPORT_DOWNSTREAM_GLOBAL => "하류 전체 레벨",
        PRICE_HEADING => "\n-- 판매가 --",
        PRICE_BOX => "박스",
        PRICE_BAFFLES => "배플",
        PRICE_LATERAL => "측벽 배플",
        PRICE_MATERIALS => "자재비",
        PRICE_LABOR => "인건비",
        PRICE_INDIRECT => "간접비",
        PRICE_MARGIN => "이윤",
        PRICE_FINAL => "판매가",
        PRICE_TOTAL => "합계",
        TABLES_HEADING => "\n-- 참조표 --",
        TABLES_ATTENUATION => "기준 삽입손실 D_ref [dB]",
        TABLES_PRESSURE_LOSS => "압력손실 상수",
        TABLES_BOX_PRICES => "박스 단가표",
        TABLES_BAFFLE_PRICES => "배플 단가표",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_OPTIONS => "1) ζ 상관식  2) 공력 프로파일 적용  3) 하류 자생소음 표현  4) 허용 유속  5) 측벽 배플 면 수  6) 언어  7) 표시 단위",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_PROMPT_UNITS => "길이 풍량 압력 유속 단위(예: mm m3/h Pa m/s, '-'는 유지): ",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        CONFIG_WRITTEN => "설정 파일을 생성했습니다",
        _ => "???",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Baffle Silencer Toolbox ===",
        MAIN_MENU_SIZING => "1) Full sizing",
        MAIN_MENU_ATTENUATION => "2) Insertion loss",
        MAIN_MENU_PRESSURE_LOSS => "3) Pressure loss",
        MAIN_MENU_REGENERATED => "4) Regenerated noise",
        MAIN_MENU_PRICE => "5) Selling price",
        MAIN_MENU_TABLES => "6) Reference tables",
        MAIN_MENU_SETTINGS => "7) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        PROMPT_DEFAULT_HINT => "Enter = default",
        PROMPT_WIDTH => "Width W",
        PROMPT_HEIGHT => "Height H",
        PROMPT_DEPTH => "Length L",
        PROMPT_THICKNESS => "Baffle thickness d",
        PROMPT_BAFFLE_COUNT => "Baffle count n",
        PROMPT_FLOW => "Air flow Q",
        PROMPT_UPSTREAM => "Upstream spectrum, 8 values 63..8k Hz [dB] ('-' = none, Enter = skip): ",
        REPORT_MODEL => "Model code",
        REPORT_GAP => "Gap s",
        REPORT_FREE_AREA => "Free area",
        REPORT_VELOCITY => "Gap velocity",
        REPORT_GAP_INVALID => "Warning: baffles fill the whole width (gap <= 0).",
        REPORT_VELOCITY_EXCEEDED => "Warning: gap velocity exceeds the allowed maximum.",
        REPORT_PROCEED => "Design check passed",
        REPORT_ATTENUATION => "\n-- Insertion loss --",
        REPORT_ATTENUATION_GLOBAL => "Global insertion loss",
        REPORT_PRESSURE_LOSS => "\n-- Pressure loss --",
        REPORT_ZETA => "Resistance coefficient ζ",
        REPORT_DELTA_P => "Pressure drop Δp",
        REPORT_REGENERATED => "\n-- Regenerated noise --",
        REPORT_LW_GLOBAL => "Sound power L_w",
        REPORT_LWA_GLOBAL => "A-weighted L_wA",
        REPORT_DOWNSTREAM => "\n-- Downstream noise --",
        REPORT_UPSTREAM_GLOBAL => "Upstream global level",
        REPORT_DOWNSTREAM_GLOBAL => "Downstream global level",
        PRICE_HEADING => "\n-- Selling price --",
        PRICE_BOX => "Box",
        PRICE_BAFFLES => "Baffles",
        PRICE_LATERAL => "Lateral baffles",
        PRICE_MATERIALS => "Materials",
        PRICE_LABOR => "Labor",
        PRICE_INDIRECT => "Indirect",
        PRICE_MARGIN => "Margin",
        PRICE_FINAL => "Price",
        PRICE_TOTAL => "Total",
        TABLES_HEADING => "\n-- Reference tables --",
        TABLES_ATTENUATION => "Reference insertion loss D_ref [dB]",
        TABLES_PRESSURE_LOSS => "Pressure loss constants",
        TABLES_BOX_PRICES => "Box price table",
        TABLES_BAFFLE_PRICES => "Baffle price table",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_OPTIONS => "1) ζ model  2) Aero profile  3) Downstream noise mode  4) Max velocity  5) Lateral faces  6) Language  7) Display units",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_INVALID => "Invalid input, nothing changed.",
        SETTINGS_PROMPT_UNITS => "Length flow pressure velocity units (e.g. in cfm inH2O fpm, '-' keeps): ",
        SETTINGS_SAVED => "Settings saved.",
        CONFIG_WRITTEN => "Configuration written",
        _ => return None,
    })
}
