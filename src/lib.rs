//! 횡형 원통 탱크 딥 계산 로직을 라이브러리로 분리하여 CLI 외의 보고서/화면에서도 재사용한다.

pub mod app;
pub mod cli;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod tank;
pub mod ui_cli;
pub mod units;
