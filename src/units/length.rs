use serde::{Deserialize, Serialize};

/// 딥 눈금 및 탱크 치수에 쓰는 길이 단위. 내부 기준은 센티미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    Foot,
}

impl LengthUnit {
    /// 화면 표시용 기호.
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        }
    }

    /// 1 단위가 몇 cm인지.
    fn cm_per_unit(self) -> f64 {
        match self {
            LengthUnit::Millimeter => 0.1,
            LengthUnit::Centimeter => 1.0,
            LengthUnit::Meter => 100.0,
            LengthUnit::Inch => 2.54,
            LengthUnit::Foot => 30.48,
        }
    }
}

/// 주어진 단위의 값을 cm로 환산한다.
pub fn to_centimeter(value: f64, unit: LengthUnit) -> f64 {
    value * unit.cm_per_unit()
}

/// cm 값을 주어진 단위로 환산한다.
pub fn from_centimeter(value_cm: f64, unit: LengthUnit) -> f64 {
    value_cm / unit.cm_per_unit()
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    from_centimeter(to_centimeter(value, from), to)
}
