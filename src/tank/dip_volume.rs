use std::f64::consts::PI;

use log::debug;

use super::{Tank, TankError};

/// 역산 시 허용하는 딥 오차 [cm]
const DIP_TOLERANCE_CM: f64 = 1e-9;
const MAX_BISECTION_STEPS: usize = 200;

/// 검증을 마친 탱크 형상 (cm 기준).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Geometry {
    pub radius_cm: f64,
    pub length_cm: f64,
}

impl Geometry {
    /// 치수를 검증하고, 만수 체적이 유한한 양수가 아니면(언더/오버플로) 거부한다.
    pub fn of(tank: &Tank) -> Result<Self, TankError> {
        tank.validate()?;
        let geometry = Self {
            radius_cm: tank.inside_diameter_m * 100.0 / 2.0,
            length_cm: tank.inside_length_m * 100.0,
        };
        let full = geometry.full_volume_liters();
        if full.is_finite() && full > 0.0 {
            Ok(geometry)
        } else {
            Err(TankError::InvalidTankDimensions {
                diameter_m: tank.inside_diameter_m,
                length_m: tank.inside_length_m,
            })
        }
    }

    pub fn diameter_cm(&self) -> f64 {
        self.radius_cm * 2.0
    }

    pub fn full_volume_liters(&self) -> f64 {
        PI * self.radius_cm * self.radius_cm * self.length_cm / 1000.0
    }

    /// 바닥에서 높이 h까지 잠긴 원의 활꼴(segment) 단면적 [cm²].
    fn segment_area_cm2(&self, h: f64) -> f64 {
        let r = self.radius_cm;
        let offset = r - h;
        // h가 0 또는 2r일 때 부동소수 오차로 acos 입력이 [-1, 1]을 넘을 수 있다
        let angle = (offset / r).clamp(-1.0, 1.0).acos();
        let half_chord = (2.0 * r * h - h * h).max(0.0).sqrt();
        (r * r * angle - offset * half_chord).max(0.0)
    }

    /// 범위 검사를 마친 딥 값에 대한 체적 [L].
    pub fn volume_at(&self, dip_cm: f64) -> f64 {
        let full = self.full_volume_liters();
        if dip_cm <= 0.0 {
            return 0.0;
        }
        if dip_cm >= self.diameter_cm() {
            return full;
        }
        let volume = self.segment_area_cm2(dip_cm) * self.length_cm / 1000.0;
        volume.clamp(0.0, full)
    }

    pub fn check_dip(&self, dip_cm: f64) -> Result<(), TankError> {
        let diameter_cm = self.diameter_cm();
        if dip_cm.is_finite() && (0.0..=diameter_cm).contains(&dip_cm) {
            Ok(())
        } else {
            Err(TankError::InvalidDipReading {
                dip_cm,
                diameter_cm,
            })
        }
    }
}

/// 딥 값(바닥 기준 액면 높이, cm)을 체적(L)으로 환산한다.
///
/// 단면적 = r²·acos((r−h)/r) − (r−h)·√(2rh − h²), 체적 = 단면적 × 길이.
/// 범위를 벗어난 딥 값은 보정하지 않고 [`TankError::InvalidDipReading`]으로 거부한다.
pub fn volume_from_dip(tank: &Tank, dip_cm: f64) -> Result<f64, TankError> {
    let geometry = Geometry::of(tank)?;
    geometry.check_dip(dip_cm)?;
    Ok(geometry.volume_at(dip_cm))
}

/// 만수 체적 π·r²·L [L].
pub fn full_volume_liters(tank: &Tank) -> Result<f64, TankError> {
    Ok(Geometry::of(tank)?.full_volume_liters())
}

/// 특정 딥에서의 저장 상태.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillLevel {
    pub dip_cm: f64,
    /// 저장량 [L]
    pub volume_liters: f64,
    /// 남은 공간(얼리지) [L]
    pub ullage_liters: f64,
    /// 충전율 0..=1
    pub fill_ratio: f64,
}

/// 딥 값에서 저장량, 얼리지, 충전율을 함께 계산한다.
pub fn fill_level(tank: &Tank, dip_cm: f64) -> Result<FillLevel, TankError> {
    let geometry = Geometry::of(tank)?;
    geometry.check_dip(dip_cm)?;
    let full = geometry.full_volume_liters();
    let volume = geometry.volume_at(dip_cm);
    Ok(FillLevel {
        dip_cm,
        volume_liters: volume,
        ullage_liters: (full - volume).max(0.0),
        fill_ratio: volume / full,
    })
}

/// 주어진 체적(L)을 담는 딥 값(cm)을 이분법으로 역산한다.
///
/// 체적 함수가 단조 증가이므로 해는 유일하다.
pub fn dip_from_volume(tank: &Tank, volume_liters: f64) -> Result<f64, TankError> {
    let geometry = Geometry::of(tank)?;
    let full = geometry.full_volume_liters();
    if !volume_liters.is_finite() || volume_liters < 0.0 || volume_liters > full {
        return Err(TankError::InvalidVolume {
            volume_liters,
            full_volume_liters: full,
        });
    }
    if volume_liters == 0.0 {
        return Ok(0.0);
    }
    if volume_liters == full {
        return Ok(geometry.diameter_cm());
    }

    let mut lo = 0.0;
    let mut hi = geometry.diameter_cm();
    let mut steps = 0;
    while hi - lo > DIP_TOLERANCE_CM && steps < MAX_BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if geometry.volume_at(mid) < volume_liters {
            lo = mid;
        } else {
            hi = mid;
        }
        steps += 1;
    }
    debug!("dip_from_volume: {volume_liters} L -> {:.6} cm ({steps}회 반복)", 0.5 * (lo + hi));
    Ok(0.5 * (lo + hi))
}

/// 명판 용량과 기하학적 만수 체적의 상대 편차 (명판 − 기하) / 기하.
///
/// 명판 용량이 없으면 `None`.
pub fn capacity_deviation(tank: &Tank) -> Result<Option<f64>, TankError> {
    let full = full_volume_liters(tank)?;
    Ok(tank
        .capacity_liters
        .filter(|c| c.is_finite())
        .map(|nominal| (nominal - full) / full))
}
