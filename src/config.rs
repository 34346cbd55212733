use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::tank::Tank;
use crate::units::{LengthUnit, VolumeUnit};

/// `--config`를 주지 않았을 때의 설정 파일 경로.
pub const CONFIG_PATH: &str = "config.toml";

/// 입력/출력 기본 단위.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultUnits {
    /// 딥 눈금 단위
    pub dip: LengthUnit,
    /// 체적 표시 단위
    pub volume: VolumeUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            dip: LengthUnit::Centimeter,
            volume: VolumeUnit::Liter,
        }
    }
}

/// 딥 차트 출력 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// 기본 눈금 간격 [cm]
    pub step_cm: f64,
    /// 체적 소수점 자리수
    pub decimals: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            step_cm: 1.0,
            decimals: 2,
        }
    }
}

/// 이름이 붙은 탱크 프리셋. 매번 치수를 다시 입력하지 않도록 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankPreset {
    pub name: String,
    #[serde(flatten)]
    pub tank: Tank,
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/ko/en)
    pub language: String,
    pub default_units: DefaultUnits,
    pub chart: ChartSettings,
    pub tanks: Vec<TankPreset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            default_units: DefaultUnits::default(),
            chart: ChartSettings::default(),
            tanks: Vec::new(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본 설정을 그 경로에 저장한다.
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!("설정 로드: {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!("기본 설정 생성: {}", path.display());
        Ok(cfg)
    }
}

impl Config {
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 이름으로 탱크 프리셋을 찾는다 (대소문자 무시).
    pub fn find_tank(&self, name: &str) -> Option<&TankPreset> {
        self.tanks
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("language = \"en\"").unwrap();
        assert_eq!(cfg.language, "en");
        assert_eq!(cfg.chart, ChartSettings::default());
        assert!(cfg.tanks.is_empty());
    }

    #[test]
    fn tank_presets_are_read_flat() {
        let src = r#"
            [[tanks]]
            name = "MS-1"
            inside_diameter_m = 2.0
            inside_length_m = 5.0
            capacity_liters = 15000.0

            [[tanks]]
            name = "HSD-2"
            inside_diameter_m = 2.5
            inside_length_m = 6.0
        "#;
        let cfg: Config = toml::from_str(src).unwrap();
        let ms = cfg.find_tank("ms-1").unwrap();
        assert_eq!(ms.tank.inside_diameter_m, 2.0);
        assert_eq!(ms.tank.capacity_liters, Some(15000.0));
        assert_eq!(cfg.find_tank("HSD-2").unwrap().tank.capacity_liters, None);
        assert!(cfg.find_tank("XP-3").is_none());
    }
}
