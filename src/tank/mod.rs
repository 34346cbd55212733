//! 횡형 원통 탱크의 딥(액면 높이) ↔ 체적 계산 모듈 모음.
//! 단일 딥 환산, 딥 차트 생성, 역산(체적 → 딥) 등으로 구성한다.

pub mod dip_chart;
pub mod dip_volume;

pub use dip_chart::{generate_dip_chart, DipChart, DipChartRow, DipChartRows, MAX_CHART_ROWS};
pub use dip_volume::{
    capacity_deviation, dip_from_volume, fill_level, full_volume_liters, volume_from_dip,
    FillLevel,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 탱크 계산 오류. 모두 호출자가 입력을 바로잡으면 복구 가능한 오류이다.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TankError {
    /// 내경 또는 길이가 0 이하이거나 누락(NaN)된 경우
    #[error("탱크 치수가 잘못되었습니다: 내경 {diameter_m} m, 길이 {length_m} m")]
    InvalidTankDimensions { diameter_m: f64, length_m: f64 },
    /// 딥 값이 0 ~ 내경 범위를 벗어난 경우
    #[error("딥 값 {dip_cm} cm 가 허용 범위(0 ~ {diameter_cm} cm)를 벗어났습니다")]
    InvalidDipReading { dip_cm: f64, diameter_cm: f64 },
    /// 차트 간격이 0 이하이거나 내경보다 큰 경우
    #[error("차트 간격 {step_cm} cm 는 0보다 크고 {diameter_cm} cm 이하여야 합니다")]
    InvalidStep { step_cm: f64, diameter_cm: f64 },
    /// 역산 대상 체적이 음수이거나 만수 체적을 넘는 경우
    #[error("체적 {volume_liters} L 가 허용 범위(0 ~ {full_volume_liters} L)를 벗어났습니다")]
    InvalidVolume {
        volume_liters: f64,
        full_volume_liters: f64,
    },
}

/// 횡형 원통 탱크의 내부 치수. 마스터 데이터에서 읽기 전용으로 전달받는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    /// 내경 [m]
    pub inside_diameter_m: f64,
    /// 내부 길이 [m]
    pub inside_length_m: f64,
    /// 명판 용량 [L]. 표시/검증용이며 기하 계산에는 쓰지 않는다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_liters: Option<f64>,
}

impl Tank {
    pub fn new(inside_diameter_m: f64, inside_length_m: f64) -> Self {
        Self {
            inside_diameter_m,
            inside_length_m,
            capacity_liters: None,
        }
    }

    pub fn with_capacity(mut self, capacity_liters: f64) -> Self {
        self.capacity_liters = Some(capacity_liters);
        self
    }

    /// 내경을 cm로 반환한다.
    pub fn diameter_cm(&self) -> f64 {
        self.inside_diameter_m * 100.0
    }

    /// 치수가 유효한지 검사한다.
    pub fn validate(&self) -> Result<(), TankError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.inside_diameter_m) && ok(self.inside_length_m) {
            Ok(())
        } else {
            Err(TankError::InvalidTankDimensions {
                diameter_m: self.inside_diameter_m,
                length_m: self.inside_length_m,
            })
        }
    }
}
