//! 단위 정의 및 변환 모듈 모음.

pub mod length;

pub use length::{conversion_table, convert_length, LengthUnit};
