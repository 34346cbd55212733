use serde::{Deserialize, Serialize};

/// 액체 체적 단위. 내부 기준은 리터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeUnit {
    Liter,
    CubicMeter,
    UsGallon,
    ImperialGallon,
}

impl VolumeUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            VolumeUnit::Liter => "L",
            VolumeUnit::CubicMeter => "m3",
            VolumeUnit::UsGallon => "gal(US)",
            VolumeUnit::ImperialGallon => "gal(UK)",
        }
    }

    fn liters_per_unit(self) -> f64 {
        match self {
            VolumeUnit::Liter => 1.0,
            VolumeUnit::CubicMeter => 1000.0,
            VolumeUnit::UsGallon => 3.785_411_784,
            VolumeUnit::ImperialGallon => 4.546_09,
        }
    }
}

pub fn to_liter(value: f64, unit: VolumeUnit) -> f64 {
    value * unit.liters_per_unit()
}

pub fn from_liter(value_l: f64, unit: VolumeUnit) -> f64 {
    value_l / unit.liters_per_unit()
}

/// 체적을 변환한다.
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    from_liter(to_liter(value, from), to)
}
