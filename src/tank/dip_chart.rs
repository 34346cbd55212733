use std::iter::FusedIterator;

use log::debug;
use serde::Serialize;

use super::dip_volume::Geometry;
use super::{Tank, TankError};
use crate::units::{from_centimeter, from_liter, LengthUnit, VolumeUnit};

/// 마지막 눈금이 내경과 이 값 이내면 내경 행 하나로 합친다 [cm]
const END_SNAP_CM: f64 = 1e-9;
/// 한 차트가 가질 수 있는 최대 행 수
pub const MAX_CHART_ROWS: usize = 10_000_000;

/// 딥 차트의 한 행.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DipChartRow {
    pub dip_cm: f64,
    pub volume_liters: f64,
}

/// 딥 차트. 행을 미리 만들어 두지 않고 `rows()` 호출 시마다 계산한다.
///
/// 같은 차트에서 여러 번 순회해도 결과는 항상 같다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipChart {
    geometry: Geometry,
    step_cm: f64,
    len: usize,
}

/// 0, step, 2·step, … , 내경 까지의 딥 차트를 만든다.
///
/// 내경이 간격의 배수가 아니어도 마지막 행은 항상 정확히 내경이다.
/// 행 수가 [`MAX_CHART_ROWS`]를 넘는 간격은 [`TankError::InvalidStep`]으로 거부한다.
pub fn generate_dip_chart(tank: &Tank, step_cm: f64) -> Result<DipChart, TankError> {
    let geometry = Geometry::of(tank)?;
    let diameter_cm = geometry.diameter_cm();
    let invalid = TankError::InvalidStep {
        step_cm,
        diameter_cm,
    };
    if !step_cm.is_finite() || step_cm <= 0.0 || step_cm > diameter_cm {
        return Err(invalid);
    }

    // 내경 이하인 마지막 눈금 번호. 간격이 극히 작으면 무한대가 될 수 있다
    let last_index = (diameter_cm / step_cm + 1e-9).floor();
    if last_index > (MAX_CHART_ROWS - 2) as f64 {
        return Err(invalid);
    }
    let last_index = last_index as usize;
    let len = if diameter_cm - last_index as f64 * step_cm <= END_SNAP_CM {
        last_index + 1
    } else {
        last_index + 2
    };
    debug!(
        "dip chart: D={diameter_cm} cm, step={step_cm} cm, {len} rows"
    );
    Ok(DipChart {
        geometry,
        step_cm,
        len,
    })
}

impl DipChart {
    pub fn diameter_cm(&self) -> f64 {
        self.geometry.diameter_cm()
    }

    pub fn full_volume_liters(&self) -> f64 {
        self.geometry.full_volume_liters()
    }

    /// 행 수.
    pub fn len(&self) -> usize {
        self.len
    }

    /// 최소 두 행(0, 내경)을 가지므로 항상 false.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn rows(&self) -> DipChartRows {
        DipChartRows {
            chart: *self,
            next: 0,
        }
    }

    /// 표시 단위로 환산된 (딥, 체적) 쌍을 돌려준다.
    pub fn rows_in(
        &self,
        dip_unit: LengthUnit,
        volume_unit: VolumeUnit,
    ) -> impl Iterator<Item = (f64, f64)> {
        self.rows().map(move |row| {
            (
                from_centimeter(row.dip_cm, dip_unit),
                from_liter(row.volume_liters, volume_unit),
            )
        })
    }

    fn dip_at(&self, index: usize) -> f64 {
        if index + 1 == self.len {
            self.diameter_cm()
        } else {
            index as f64 * self.step_cm
        }
    }
}

impl<'a> IntoIterator for &'a DipChart {
    type Item = DipChartRow;
    type IntoIter = DipChartRows;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

/// 딥 차트 행 반복자.
#[derive(Debug, Clone)]
pub struct DipChartRows {
    chart: DipChart,
    next: usize,
}

impl Iterator for DipChartRows {
    type Item = DipChartRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.chart.len {
            return None;
        }
        let dip_cm = self.chart.dip_at(self.next);
        self.next += 1;
        Some(DipChartRow {
            dip_cm,
            volume_liters: self.chart.geometry.volume_at(dip_cm),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chart.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DipChartRows {}

impl FusedIterator for DipChartRows {}
