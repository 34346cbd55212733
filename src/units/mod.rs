//! 단위 정의 및 변환 모듈 모음.

pub mod length;
pub mod volume;

pub use length::{convert_length, from_centimeter, to_centimeter, LengthUnit};
pub use volume::{convert_volume, from_liter, to_liter, VolumeUnit};
