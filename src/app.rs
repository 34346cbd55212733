use log::{info, warn};
use std::path::Path;
use thiserror::Error;

use crate::cli::{Command, TankArgs};
use crate::config::{Config, ConfigError};
use crate::conversion::{self, parse_length_unit, parse_volume_unit, ConversionError};
use crate::i18n::{self, Translator};
use crate::tank::{self, DipChart, FillLevel, Tank, TankError};
use crate::ui_cli::{self, MenuChoice};
use crate::units::{to_centimeter, to_liter, LengthUnit, VolumeUnit};

/// 명판 용량과 기하 체적의 허용 편차 비율
pub const CAPACITY_TOLERANCE: f64 = 0.05;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 딥/체적 계산 오류
    #[error("탱크 계산 오류: {0}")]
    Tank(#[from] TankError),
    /// 설정에 없는 탱크 이름
    #[error("등록되지 않은 탱크: {0}")]
    UnknownTank(String),
    /// 탱크 이름도 치수도 주어지지 않음
    #[error("--tank 또는 --diameter/--length 가 필요합니다")]
    MissingTank,
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &Translator) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(tr)? {
            MenuChoice::DipVolume => ui_cli::handle_dip_volume(tr, config),
            MenuChoice::DipChart => ui_cli::handle_dip_chart(tr, config),
            MenuChoice::DipFromVolume => ui_cli::handle_dip_from_volume(tr, config),
            MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(tr),
            MenuChoice::Tanks => {
                ui_cli::print_tanks(tr, config);
                Ok(())
            }
            MenuChoice::Settings => ui_cli::handle_settings(tr, config).and_then(|_| {
                config.save_to(config_path)?;
                info!("설정 저장: {}", config_path.display());
                Ok(())
            }),
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        // 계산 오류는 메뉴로 돌아가고, 입출력 오류만 루프를 끝낸다
        match outcome {
            Err(AppError::Io(e)) => return Err(AppError::Io(e)),
            Err(e) => println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX)),
            Ok(()) => {}
        }
    }
    Ok(())
}

/// 하위 명령 하나를 실행하고 결과를 출력한다.
pub fn run_command(command: Command, config: &Config, tr: &Translator) -> Result<(), AppError> {
    match command {
        Command::Volume {
            tank,
            dip,
            dip_unit,
            volume_unit,
        } => {
            let tank = resolve_tank(&tank, config)?;
            let units = DisplayUnits::resolve(dip_unit.as_deref(), volume_unit.as_deref(), config)?;
            let level = dip_volume(&tank, dip, units)?;
            ui_cli::print_fill_level(tr, config, &level, units.dip, units.volume);
        }
        Command::Chart {
            tank,
            step,
            step_unit,
            volume_unit,
        } => {
            let tank = resolve_tank(&tank, config)?;
            let units =
                DisplayUnits::resolve(step_unit.as_deref(), volume_unit.as_deref(), config)?;
            let chart = dip_chart(&tank, step, units, config)?;
            ui_cli::print_chart(tr, config, &chart, units.dip, units.volume);
        }
        Command::Dip {
            tank,
            volume,
            volume_unit,
            dip_unit,
        } => {
            let tank = resolve_tank(&tank, config)?;
            let units = DisplayUnits::resolve(dip_unit.as_deref(), volume_unit.as_deref(), config)?;
            let dip_cm = dip_for_volume(&tank, volume, units)?;
            ui_cli::print_dip(tr, dip_cm, units.dip);
        }
        Command::Convert {
            kind,
            value,
            from,
            to,
        } => {
            let result = conversion::convert(kind, value, &from, &to)?;
            println!("{} {result} {to}", tr.t(i18n::keys::UNIT_CONVERSION_RESULT));
        }
        Command::Tanks => ui_cli::print_tanks(tr, config),
    }
    Ok(())
}

/// 입력과 출력에 쓰는 딥/체적 단위 쌍.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayUnits {
    pub dip: LengthUnit,
    pub volume: VolumeUnit,
}

impl DisplayUnits {
    /// 설정 파일의 기본 단위.
    pub fn from_config(config: &Config) -> Self {
        Self {
            dip: config.default_units.dip,
            volume: config.default_units.volume,
        }
    }

    /// 명령줄 단위 인자를 해석한다. 주어지지 않은 쪽은 설정의 기본 단위를 쓴다.
    pub fn resolve(
        dip: Option<&str>,
        volume: Option<&str>,
        config: &Config,
    ) -> Result<Self, ConversionError> {
        let defaults = Self::from_config(config);
        Ok(Self {
            dip: dip.map_or(Ok(defaults.dip), parse_length_unit)?,
            volume: volume.map_or(Ok(defaults.volume), parse_volume_unit)?,
        })
    }
}

/// `dip` 을 `units.dip` 단위로 읽은 저장 상태.
pub fn dip_volume(tank: &Tank, dip: f64, units: DisplayUnits) -> Result<FillLevel, TankError> {
    tank::fill_level(tank, to_centimeter(dip, units.dip))
}

/// `step` 은 `units.dip` 단위이며, 없으면 설정의 기본 간격(cm)을 쓴다.
pub fn dip_chart(
    tank: &Tank,
    step: Option<f64>,
    units: DisplayUnits,
    config: &Config,
) -> Result<DipChart, TankError> {
    let step_cm = step.map_or(config.chart.step_cm, |s| to_centimeter(s, units.dip));
    tank::generate_dip_chart(tank, step_cm)
}

/// `volume` 을 `units.volume` 단위로 읽어 딥(cm)을 역산한다.
pub fn dip_for_volume(tank: &Tank, volume: f64, units: DisplayUnits) -> Result<f64, TankError> {
    tank::dip_from_volume(tank, to_liter(volume, units.volume))
}

/// `--tank` 프리셋 또는 `--diameter/--length` 로부터 탱크를 만든다.
pub fn resolve_tank(args: &TankArgs, config: &Config) -> Result<Tank, AppError> {
    if let Some(name) = &args.tank {
        let preset = config
            .find_tank(name)
            .ok_or_else(|| AppError::UnknownTank(name.clone()))?;
        return Ok(preset.tank);
    }
    match (args.diameter, args.length) {
        (Some(d), Some(l)) => {
            let tank = Tank::new(d, l);
            tank.validate()?;
            Ok(tank)
        }
        _ => Err(AppError::MissingTank),
    }
}

/// 명판 용량 편차가 허용치를 넘으면 경고를 남기고 편차를 반환한다.
pub fn check_capacity(name: &str, tank: &Tank) -> Result<Option<f64>, TankError> {
    let deviation = tank::capacity_deviation(tank)?;
    if let Some(dev) = deviation.filter(|d| d.abs() > CAPACITY_TOLERANCE) {
        warn!("탱크 {name}: 명판 용량 편차 {:+.1}%", dev * 100.0);
    }
    Ok(deviation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TankPreset;

    fn config_with_preset() -> Config {
        Config {
            tanks: vec![TankPreset {
                name: "MS-1".into(),
                tank: Tank::new(2.0, 5.0).with_capacity(15_000.0),
            }],
            ..Config::default()
        }
    }

    #[test]
    fn preset_name_resolves_to_its_dimensions() {
        let args = TankArgs {
            tank: Some("ms-1".into()),
            diameter: None,
            length: None,
        };
        let tank = resolve_tank(&args, &config_with_preset()).unwrap();
        assert_eq!(tank.inside_length_m, 5.0);
    }

    #[test]
    fn unknown_preset_and_missing_dimensions_are_errors() {
        let cfg = config_with_preset();
        let unknown = TankArgs {
            tank: Some("HSD-9".into()),
            diameter: None,
            length: None,
        };
        assert!(matches!(
            resolve_tank(&unknown, &cfg),
            Err(AppError::UnknownTank(name)) if name == "HSD-9"
        ));
        let missing = TankArgs {
            tank: None,
            diameter: Some(2.0),
            length: None,
        };
        assert!(matches!(resolve_tank(&missing, &cfg), Err(AppError::MissingTank)));
    }

    #[test]
    fn zero_diameter_is_rejected_before_any_calculation() {
        let args = TankArgs {
            tank: None,
            diameter: Some(0.0),
            length: Some(5.0),
        };
        assert!(matches!(
            resolve_tank(&args, &Config::default()),
            Err(AppError::Tank(TankError::InvalidTankDimensions { .. }))
        ));
    }

    #[test]
    fn fifteen_kl_nameplate_is_within_tolerance_of_two_by_five() {
        // 기하 체적 15,707.96 L 대비 -4.5%
        let dev = check_capacity("MS-1", &Tank::new(2.0, 5.0).with_capacity(15_000.0))
            .unwrap()
            .unwrap();
        assert!(dev < 0.0 && dev.abs() < CAPACITY_TOLERANCE);
    }

    fn preset_args() -> TankArgs {
        TankArgs {
            tank: Some("MS-1".into()),
            diameter: None,
            length: None,
        }
    }

    #[test]
    fn unit_flags_fall_back_to_configured_defaults() {
        let mut cfg = Config::default();
        cfg.default_units.dip = LengthUnit::Inch;
        cfg.default_units.volume = VolumeUnit::UsGallon;
        assert_eq!(
            DisplayUnits::resolve(None, None, &cfg).unwrap(),
            DisplayUnits {
                dip: LengthUnit::Inch,
                volume: VolumeUnit::UsGallon,
            }
        );
        assert_eq!(
            DisplayUnits::resolve(Some("mm"), Some("m3"), &cfg).unwrap(),
            DisplayUnits {
                dip: LengthUnit::Millimeter,
                volume: VolumeUnit::CubicMeter,
            }
        );
        assert!(matches!(
            DisplayUnits::resolve(Some("furlong"), None, &cfg),
            Err(ConversionError::UnknownUnit(_))
        ));
    }

    #[test]
    fn millimetre_dip_is_converted_before_lookup() {
        let tank = Tank::new(2.0, 5.0);
        let units = DisplayUnits {
            dip: LengthUnit::Millimeter,
            volume: VolumeUnit::Liter,
        };
        let level = dip_volume(&tank, 1000.0, units).unwrap();
        assert!((level.dip_cm - 100.0).abs() < 1e-9);
        assert!((level.fill_ratio - 0.5).abs() < 1e-12);
        assert!(matches!(
            dip_volume(&tank, 2001.0, units),
            Err(TankError::InvalidDipReading { .. })
        ));
    }

    #[test]
    fn chart_step_is_read_in_the_dip_unit() {
        // 10 in = 25.4 cm 간격, 200 cm 탱크 → 0 .. 177.8 + 200
        let cfg = Config::default();
        let inches = DisplayUnits::resolve(Some("in"), None, &cfg).unwrap();
        let chart = dip_chart(&Tank::new(2.0, 5.0), Some(10.0), inches, &cfg).unwrap();
        let dips: Vec<f64> = chart.rows().map(|r| r.dip_cm).collect();
        assert_eq!(dips.len(), 9);
        assert!((dips[1] - 25.4).abs() < 1e-9);
        assert!((dips[7] - 177.8).abs() < 1e-9);
        assert_eq!(dips[8], 200.0);
    }

    #[test]
    fn chart_without_step_unit_follows_configured_dip_unit() {
        let mut cfg = Config::default();
        cfg.default_units.dip = LengthUnit::Inch;
        let units = DisplayUnits::resolve(None, None, &cfg).unwrap();
        let tank = Tank::new(2.0, 5.0);
        assert_eq!(dip_chart(&tank, Some(10.0), units, &cfg).unwrap().len(), 9);
        // 간격을 생략하면 설정의 cm 간격을 그대로 쓴다
        assert_eq!(dip_chart(&tank, None, units, &cfg).unwrap().len(), 201);
    }

    #[test]
    fn gallon_volume_is_converted_before_inverse_lookup() {
        let tank = Tank::new(2.0, 5.0);
        let units = DisplayUnits {
            dip: LengthUnit::Centimeter,
            volume: VolumeUnit::UsGallon,
        };
        let half_gal = tank::full_volume_liters(&tank).unwrap() / 2.0 / 3.785_411_784;
        let dip = dip_for_volume(&tank, half_gal, units).unwrap();
        assert!((dip - 100.0).abs() < 1e-6, "{dip}");
    }

    #[test]
    fn volume_subcommand_applies_its_dip_unit() {
        let cfg = config_with_preset();
        let tr = Translator::new("en");
        let too_deep = Command::Volume {
            tank: preset_args(),
            dip: 2500.0,
            dip_unit: Some("mm".into()),
            volume_unit: None,
        };
        match run_command(too_deep, &cfg, &tr) {
            Err(AppError::Tank(TankError::InvalidDipReading {
                dip_cm,
                diameter_cm,
            })) => {
                assert!((dip_cm - 250.0).abs() < 1e-9);
                assert_eq!(diameter_cm, 200.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        let in_range = Command::Volume {
            tank: preset_args(),
            dip: 1500.0,
            dip_unit: Some("mm".into()),
            volume_unit: Some("gal".into()),
        };
        assert!(run_command(in_range, &cfg, &tr).is_ok());
    }

    #[test]
    fn dip_subcommand_rejects_volume_above_full_in_its_unit() {
        // 15,707.96 L = 15.708 m3, 16 m3 는 만수 초과
        let cfg = config_with_preset();
        let tr = Translator::new("en");
        let over = Command::Dip {
            tank: preset_args(),
            volume: 16.0,
            volume_unit: Some("m3".into()),
            dip_unit: None,
        };
        assert!(matches!(
            run_command(over, &cfg, &tr),
            Err(AppError::Tank(TankError::InvalidVolume { .. }))
        ));
        let unknown_unit = Command::Chart {
            tank: preset_args(),
            step: Some(1.0),
            step_unit: Some("furlong".into()),
            volume_unit: None,
        };
        assert!(matches!(
            run_command(unknown_unit, &cfg, &tr),
            Err(AppError::Conversion(_))
        ));
    }
}
