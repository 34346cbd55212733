use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::*;

/// 변환기가 다루는 물리량 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum QuantityKind {
    Length,
    Volume,
}

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `cm`, `mm`, `in`, `L`, `m3`, `gal` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Length => {
            let from = parse_length_unit(from_unit_str)?;
            let to = parse_length_unit(to_unit_str)?;
            Ok(convert_length(value, from, to))
        }
        QuantityKind::Volume => {
            let from = parse_volume_unit(from_unit_str)?;
            let to = parse_volume_unit(to_unit_str)?;
            Ok(convert_volume(value, from, to))
        }
    }
}

pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "mm" | "millimeter" | "millimetre" => Ok(LengthUnit::Millimeter),
        "cm" | "centimeter" | "centimetre" => Ok(LengthUnit::Centimeter),
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "in" | "inch" | "\"" => Ok(LengthUnit::Inch),
        "ft" | "foot" | "feet" => Ok(LengthUnit::Foot),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_volume_unit(s: &str) -> Result<VolumeUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "l" | "liter" | "litre" | "ltr" => Ok(VolumeUnit::Liter),
        "m3" | "m^3" | "kl" => Ok(VolumeUnit::CubicMeter),
        "gal" | "usgal" | "gal(us)" => Ok(VolumeUnit::UsGallon),
        "impgal" | "ukgal" | "gal(uk)" => Ok(VolumeUnit::ImperialGallon),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
