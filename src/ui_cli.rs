use std::io::{self, Write};

use crate::app::{self, AppError, DisplayUnits, CAPACITY_TOLERANCE};
use crate::config::Config;
use crate::conversion::{self, QuantityKind};
use crate::i18n::{keys, Translator};
use crate::tank::{self, DipChart, FillLevel, Tank};
use crate::units::{from_centimeter, from_liter, LengthUnit, VolumeUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DipVolume,
    DipChart,
    DipFromVolume,
    UnitConversion,
    Tanks,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_DIP_VOLUME,
        keys::MAIN_MENU_DIP_CHART,
        keys::MAIN_MENU_DIP_FROM_VOLUME,
        keys::MAIN_MENU_UNIT_CONVERSION,
        keys::MAIN_MENU_TANKS,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::DipVolume),
            "2" => return Ok(MenuChoice::DipChart),
            "3" => return Ok(MenuChoice::DipFromVolume),
            "4" => return Ok(MenuChoice::UnitConversion),
            "5" => return Ok(MenuChoice::Tanks),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 딥 → 체적 메뉴를 처리한다.
pub fn handle_dip_volume(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::DIP_VOLUME_HEADING));
    let tank = read_tank(tr, cfg)?;
    let units = DisplayUnits::from_config(cfg);
    let dip = read_f64(&format!("{} [{}]: ", tr.t(keys::PROMPT_DIP), units.dip.symbol()), tr)?;
    let level = app::dip_volume(&tank, dip, units)?;
    print_fill_level(tr, cfg, &level, units.dip, units.volume);
    Ok(())
}

/// 딥 차트 메뉴를 처리한다.
pub fn handle_dip_chart(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::DIP_CHART_HEADING));
    let tank = read_tank(tr, cfg)?;
    let units = DisplayUnits::from_config(cfg);
    let prompt = format!(
        "{} [{}] ({}): ",
        tr.t(keys::PROMPT_STEP),
        units.dip.symbol(),
        from_centimeter(cfg.chart.step_cm, units.dip)
    );
    let step = read_optional_f64(&prompt, tr)?;
    let chart = app::dip_chart(&tank, step, units, cfg)?;
    print_chart(tr, cfg, &chart, units.dip, units.volume);
    Ok(())
}

/// 체적 → 딥 메뉴를 처리한다.
pub fn handle_dip_from_volume(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::DIP_FROM_VOLUME_HEADING));
    let tank = read_tank(tr, cfg)?;
    let units = DisplayUnits::from_config(cfg);
    let volume = read_f64(
        &format!("{} [{}]: ", tr.t(keys::PROMPT_VOLUME), units.volume.symbol()),
        tr,
    )?;
    let dip_cm = app::dip_for_volume(&tank, volume, units)?;
    print_dip(tr, dip_cm, units.dip);
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    println!("{}", tr.t(keys::UNIT_CONVERSION_OPTIONS));
    let kind = loop {
        match read_line(&tr.t(keys::PROMPT_SELECT))?.trim() {
            "1" => break QuantityKind::Length,
            "2" => break QuantityKind::Volume,
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    let value = read_f64(&tr.t(keys::UNIT_CONVERSION_PROMPT_VALUE), tr)?;
    let from_unit = read_line(&tr.t(keys::UNIT_CONVERSION_PROMPT_FROM_UNIT))?;
    let to_unit = read_line(&tr.t(keys::UNIT_CONVERSION_PROMPT_TO_UNIT))?;
    let result = conversion::convert(kind, value, from_unit.trim(), to_unit.trim())?;
    println!(
        "{} {result} {}",
        tr.t(keys::UNIT_CONVERSION_RESULT),
        to_unit.trim()
    );
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} / {} / step {} cm",
        tr.t(keys::SETTINGS_CURRENT),
        cfg.default_units.dip.symbol(),
        cfg.default_units.volume.symbol(),
        cfg.chart.step_cm
    );

    println!("{}", tr.t(keys::SETTINGS_DIP_UNIT_OPTIONS));
    match read_line(&tr.t(keys::PROMPT_SELECT))?.trim() {
        "" => {}
        "1" => cfg.default_units.dip = LengthUnit::Millimeter,
        "2" => cfg.default_units.dip = LengthUnit::Centimeter,
        "3" => cfg.default_units.dip = LengthUnit::Inch,
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }

    println!("{}", tr.t(keys::SETTINGS_VOLUME_UNIT_OPTIONS));
    match read_line(&tr.t(keys::PROMPT_SELECT))?.trim() {
        "" => {}
        "1" => cfg.default_units.volume = VolumeUnit::Liter,
        "2" => cfg.default_units.volume = VolumeUnit::CubicMeter,
        "3" => cfg.default_units.volume = VolumeUnit::UsGallon,
        "4" => cfg.default_units.volume = VolumeUnit::ImperialGallon,
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }

    match read_optional_f64(&tr.t(keys::SETTINGS_PROMPT_STEP), tr)? {
        Some(step) if step.is_finite() && step > 0.0 => cfg.chart.step_cm = step,
        Some(_) => println!("{}", tr.t(keys::SETTINGS_INVALID)),
        None => {}
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

pub fn print_fill_level(
    tr: &Translator,
    cfg: &Config,
    level: &FillLevel,
    dip_unit: LengthUnit,
    volume_unit: VolumeUnit,
) {
    let d = cfg.chart.decimals;
    let sym = volume_unit.symbol();
    println!(
        "{} {:.3} {}",
        tr.t(keys::RESULT_DIP),
        from_centimeter(level.dip_cm, dip_unit),
        dip_unit.symbol()
    );
    println!(
        "{} {:.d$} {sym}",
        tr.t(keys::RESULT_VOLUME),
        from_liter(level.volume_liters, volume_unit)
    );
    println!(
        "{} {:.d$} {sym}",
        tr.t(keys::RESULT_ULLAGE),
        from_liter(level.ullage_liters, volume_unit)
    );
    println!("{} {:.1}%", tr.t(keys::RESULT_FILL_RATIO), level.fill_ratio * 100.0);
}

/// 딥 차트를 표 형태로 출력한다.
pub fn print_chart(
    tr: &Translator,
    cfg: &Config,
    chart: &DipChart,
    dip_unit: LengthUnit,
    volume_unit: VolumeUnit,
) {
    let d = cfg.chart.decimals;
    println!(
        "{:>12} | {:>16}",
        format!("{} [{}]", tr.t(keys::CHART_COLUMN_DIP), dip_unit.symbol()),
        format!("{} [{}]", tr.t(keys::CHART_COLUMN_VOLUME), volume_unit.symbol())
    );
    println!("{}", "-".repeat(31));
    for (dip, volume) in chart.rows_in(dip_unit, volume_unit) {
        println!("{dip:>12.2} | {volume:>16.d$}");
    }
    println!(
        "{} {:.d$} {}",
        tr.t(keys::RESULT_FULL_VOLUME),
        from_liter(chart.full_volume_liters(), volume_unit),
        volume_unit.symbol()
    );
}

pub fn print_dip(tr: &Translator, dip_cm: f64, dip_unit: LengthUnit) {
    println!(
        "{} {:.3} {}",
        tr.t(keys::RESULT_DIP),
        from_centimeter(dip_cm, dip_unit),
        dip_unit.symbol()
    );
}

/// 등록된 탱크 프리셋과 만수 체적을 출력한다.
pub fn print_tanks(tr: &Translator, cfg: &Config) {
    println!("{}", tr.t(keys::TANKS_HEADING));
    if cfg.tanks.is_empty() {
        println!("{}", tr.t(keys::TANKS_EMPTY));
        return;
    }
    for preset in &cfg.tanks {
        let t = &preset.tank;
        let full = match tank::full_volume_liters(t) {
            Ok(v) => v,
            Err(e) => {
                println!("{:<12} {}: {e}", preset.name, tr.t(keys::ERROR_PREFIX));
                continue;
            }
        };
        print!(
            "{:<12} Ø{:.3} m × {:.3} m  {}: {:.0} L",
            preset.name,
            t.inside_diameter_m,
            t.inside_length_m,
            tr.t(keys::RESULT_FULL_VOLUME),
            full
        );
        match app::check_capacity(&preset.name, t) {
            Ok(Some(dev)) if dev.abs() > CAPACITY_TOLERANCE => println!(
                "  ({:+.1}%, {})",
                dev * 100.0,
                tr.t(keys::TANKS_CAPACITY_MISMATCH)
            ),
            Ok(Some(dev)) => println!("  ({:+.1}%)", dev * 100.0),
            _ => println!(),
        }
    }
}

/// 프리셋 이름 또는 직접 입력한 치수로 탱크를 읽는다.
fn read_tank(tr: &Translator, cfg: &Config) -> Result<Tank, AppError> {
    if !cfg.tanks.is_empty() {
        loop {
            let name = read_line(&tr.t(keys::PROMPT_TANK_PRESET))?;
            if name.trim().is_empty() {
                break;
            }
            match cfg.find_tank(&name) {
                Some(preset) => return Ok(preset.tank),
                None => println!("{} {}", tr.t(keys::ERROR_UNKNOWN_TANK), name.trim()),
            }
        }
    }
    let diameter = read_f64(&tr.t(keys::PROMPT_DIAMETER), tr)?;
    let length = read_f64(&tr.t(keys::PROMPT_LENGTH), tr)?;
    let tank = Tank::new(diameter, length);
    tank.validate()?;
    Ok(tank)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(buf)
}

fn read_f64(prompt: &str, tr: &Translator) -> Result<f64, AppError> {
    loop {
        if let Some(v) = read_optional_f64(prompt, tr)? {
            return Ok(v);
        }
    }
}

/// 빈 입력이면 `None`, 숫자가 아니면 다시 묻는다.
fn read_optional_f64(prompt: &str, tr: &Translator) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
