use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 언어팩 TOML 파일을 찾는 기본 디렉터리.
pub const LOCALE_DIR: &str = "locales";

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_DIP_VOLUME: &str = "main_menu.dip_volume";
    pub const MAIN_MENU_DIP_CHART: &str = "main_menu.dip_chart";
    pub const MAIN_MENU_DIP_FROM_VOLUME: &str = "main_menu.dip_from_volume";
    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_TANKS: &str = "main_menu.tanks";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_UNKNOWN_TANK: &str = "error.unknown_tank";

    pub const PROMPT_TANK_PRESET: &str = "prompt.tank_preset";
    pub const PROMPT_DIAMETER: &str = "prompt.diameter";
    pub const PROMPT_LENGTH: &str = "prompt.length";
    pub const PROMPT_DIP: &str = "prompt.dip";
    pub const PROMPT_STEP: &str = "prompt.step";
    pub const PROMPT_VOLUME: &str = "prompt.volume";

    pub const DIP_VOLUME_HEADING: &str = "dip_volume.heading";
    pub const DIP_CHART_HEADING: &str = "dip_chart.heading";
    pub const DIP_FROM_VOLUME_HEADING: &str = "dip_from_volume.heading";
    pub const CHART_COLUMN_DIP: &str = "dip_chart.column_dip";
    pub const CHART_COLUMN_VOLUME: &str = "dip_chart.column_volume";

    pub const RESULT_VOLUME: &str = "result.volume";
    pub const RESULT_ULLAGE: &str = "result.ullage";
    pub const RESULT_FILL_RATIO: &str = "result.fill_ratio";
    pub const RESULT_FULL_VOLUME: &str = "result.full_volume";
    pub const RESULT_DIP: &str = "result.dip";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_OPTIONS: &str = "unit_conversion.options";
    pub const UNIT_CONVERSION_PROMPT_VALUE: &str = "unit_conversion.prompt_value";
    pub const UNIT_CONVERSION_PROMPT_FROM_UNIT: &str = "unit_conversion.prompt_from_unit";
    pub const UNIT_CONVERSION_PROMPT_TO_UNIT: &str = "unit_conversion.prompt_to_unit";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";

    pub const TANKS_HEADING: &str = "tanks.heading";
    pub const TANKS_EMPTY: &str = "tanks.empty";
    pub const TANKS_CAPACITY_MISMATCH: &str = "tanks.capacity_mismatch";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_DIP_UNIT_OPTIONS: &str = "settings.dip_unit_options";
    pub const SETTINGS_VOLUME_UNIT_OPTIONS: &str = "settings.volume_unit_options";
    pub const SETTINGS_PROMPT_STEP: &str = "settings.prompt_step";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
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

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// `<pack_dir>/<lang>.toml`이 없거나 읽을 수 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: &Path) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: load_overrides(pack_dir, lang_code),
        }
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾고, 영어가 없으면 한국어로 폴백한다.
    pub fn t(&self, key: &str) -> Cow<'static, str> {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return Cow::Owned(v.clone());
        }
        let s = match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        };
        Cow::Borrowed(s)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().and_then(|loc| normalize_locale_string(&loc)) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" | "en" => Some(lang),
        _ => None,
    }
}

/// TOML 기반 언어팩을 로드한다. `[section] key = "value"` 형태를 점 표기 키로 편다.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
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
                    walk(&format!("{prefix}.{k}"), v, out);
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
        MAIN_MENU_TITLE => "\n=== Tank Dip Toolbox ===",
        MAIN_MENU_DIP_VOLUME => "1) 딥 → 체적",
        MAIN_MENU_DIP_CHART => "2) 딥 차트",
        MAIN_MENU_DIP_FROM_VOLUME => "3) 체적 → 딥",
        MAIN_MENU_UNIT_CONVERSION => "4) 단위 변환기",
        MAIN_MENU_TANKS => "5) 탱크 목록",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_UNKNOWN_TANK => "등록되지 않은 탱크입니다:",
        PROMPT_TANK_PRESET => "탱크 이름 (직접 입력하려면 엔터): ",
        PROMPT_DIAMETER => "탱크 내경 [m]: ",
        PROMPT_LENGTH => "탱크 내부 길이 [m]: ",
        PROMPT_DIP => "딥 값",
        PROMPT_STEP => "차트 간격",
        PROMPT_VOLUME => "저장량",
        DIP_VOLUME_HEADING => "\n-- 딥 → 체적 --",
        DIP_CHART_HEADING => "\n-- 딥 차트 --",
        DIP_FROM_VOLUME_HEADING => "\n-- 체적 → 딥 --",
        CHART_COLUMN_DIP => "딥",
        CHART_COLUMN_VOLUME => "체적",
        RESULT_VOLUME => "저장량:",
        RESULT_ULLAGE => "남은 공간:",
        RESULT_FILL_RATIO => "충전율:",
        RESULT_FULL_VOLUME => "만수 체적:",
        RESULT_DIP => "딥 값:",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        UNIT_CONVERSION_OPTIONS => "1) 길이  2) 체적",
        UNIT_CONVERSION_PROMPT_VALUE => "값 입력: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "입력 단위(ex: cm, in, L): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "변환 단위(ex: mm, ft, gal): ",
        UNIT_CONVERSION_RESULT => "변환 결과:",
        TANKS_HEADING => "\n-- 탱크 목록 --",
        TANKS_EMPTY => "config.toml에 등록된 탱크가 없습니다.",
        TANKS_CAPACITY_MISMATCH => "명판 용량이 기하 체적과 다릅니다",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 설정:",
        SETTINGS_DIP_UNIT_OPTIONS => "딥 단위: 1=mm 2=cm 3=in (엔터=유지)",
        SETTINGS_VOLUME_UNIT_OPTIONS => "체적 단위: 1=L 2=m3 3=gal(US) 4=gal(UK) (엔터=유지)",
        SETTINGS_PROMPT_STEP => "기본 차트 간격 [cm] (엔터=유지): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Tank Dip Toolbox ===",
        MAIN_MENU_DIP_VOLUME => "1) Dip → Volume",
        MAIN_MENU_DIP_CHART => "2) Dip chart",
        MAIN_MENU_DIP_FROM_VOLUME => "3) Volume → Dip",
        MAIN_MENU_UNIT_CONVERSION => "4) Unit converter",
        MAIN_MENU_TANKS => "5) Tanks",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_UNKNOWN_TANK => "Unknown tank:",
        PROMPT_TANK_PRESET => "Tank name (Enter to type dimensions): ",
        PROMPT_DIAMETER => "Inside diameter [m]: ",
        PROMPT_LENGTH => "Inside length [m]: ",
        PROMPT_DIP => "Dip",
        PROMPT_STEP => "Chart step",
        PROMPT_VOLUME => "Stock",
        DIP_VOLUME_HEADING => "\n-- Dip → Volume --",
        DIP_CHART_HEADING => "\n-- Dip Chart --",
        DIP_FROM_VOLUME_HEADING => "\n-- Volume → Dip --",
        CHART_COLUMN_DIP => "Dip",
        CHART_COLUMN_VOLUME => "Volume",
        RESULT_VOLUME => "Stock:",
        RESULT_ULLAGE => "Ullage:",
        RESULT_FILL_RATIO => "Fill:",
        RESULT_FULL_VOLUME => "Full volume:",
        RESULT_DIP => "Dip:",
        UNIT_CONVERSION_HEADING => "\n-- Unit Conversion --",
        UNIT_CONVERSION_OPTIONS => "1) Length  2) Volume",
        UNIT_CONVERSION_PROMPT_VALUE => "Value: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "From unit (ex: cm, in, L): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "To unit (ex: mm, ft, gal): ",
        UNIT_CONVERSION_RESULT => "Result:",
        TANKS_HEADING => "\n-- Tanks --",
        TANKS_EMPTY => "No tanks registered in config.toml.",
        TANKS_CAPACITY_MISMATCH => "nominal capacity disagrees with geometry",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current settings:",
        SETTINGS_DIP_UNIT_OPTIONS => "Dip unit: 1=mm 2=cm 3=in (Enter keeps)",
        SETTINGS_VOLUME_UNIT_OPTIONS => "Volume unit: 1=L 2=m3 3=gal(US) 4=gal(UK) (Enter keeps)",
        SETTINGS_PROMPT_STEP => "Default chart step [cm] (Enter keeps): ",
        SETTINGS_INVALID => "Invalid input; left unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}
