//! clap 기반 명령행 정의. 하위 명령이 없으면 대화형 메뉴로 진입한다.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_PATH;
use crate::conversion::QuantityKind;

#[derive(Debug, Parser)]
#[command(
    name = "tank_dip_toolbox",
    version,
    about = "횡형 원통 탱크 딥 ↔ 체적 계산기 / Horizontal tank dip-to-volume calculator"
)]
pub struct Cli {
    /// 언어 (auto, ko, en)
    #[arg(long, short = 'L', global = true)]
    pub lang: Option<String>,

    /// 설정 파일 경로
    #[arg(long, global = true, default_value = CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// 탱크 지정 방법: 프리셋 이름 또는 내경/길이.
#[derive(Debug, Clone, Args)]
pub struct TankArgs {
    /// config.toml 에 등록된 탱크 이름
    #[arg(long, conflicts_with_all = ["diameter", "length"])]
    pub tank: Option<String>,

    /// 내경 [m]
    #[arg(long, requires = "length")]
    pub diameter: Option<f64>,

    /// 내부 길이 [m]
    #[arg(long, requires = "diameter")]
    pub length: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 딥 값을 체적으로 환산한다
    Volume {
        #[command(flatten)]
        tank: TankArgs,
        /// 바닥 기준 액면 높이
        #[arg(long, allow_negative_numbers = true)]
        dip: f64,
        /// 딥 단위 (mm, cm, in …)
        #[arg(long)]
        dip_unit: Option<String>,
        /// 체적 출력 단위 (L, m3, gal …)
        #[arg(long)]
        volume_unit: Option<String>,
    },
    /// 딥 차트를 출력한다
    Chart {
        #[command(flatten)]
        tank: TankArgs,
        /// 눈금 간격 (생략 시 설정값)
        #[arg(long)]
        step: Option<f64>,
        /// 간격 및 딥 열 단위 (기본: 설정의 딥 단위)
        #[arg(long)]
        step_unit: Option<String>,
        #[arg(long)]
        volume_unit: Option<String>,
    },
    /// 저장량에 해당하는 딥 값을 역산한다
    Dip {
        #[command(flatten)]
        tank: TankArgs,
        #[arg(long, allow_negative_numbers = true)]
        volume: f64,
        #[arg(long)]
        volume_unit: Option<String>,
        #[arg(long)]
        dip_unit: Option<String>,
    },
    /// 길이/체적 단위를 변환한다
    Convert {
        #[arg(long, value_enum)]
        kind: QuantityKind,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// 등록된 탱크 목록
    Tanks,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn volume_with_dimensions() {
        let cli = Cli::try_parse_from([
            "tank_dip_toolbox",
            "volume",
            "--diameter",
            "2",
            "--length",
            "5",
            "--dip",
            "50",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Volume { tank, dip, .. }) => {
                assert_eq!(tank.diameter, Some(2.0));
                assert_eq!(dip, 50.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn preset_and_dimensions_conflict() {
        let res = Cli::try_parse_from([
            "tank_dip_toolbox",
            "chart",
            "--tank",
            "MS-1",
            "--diameter",
            "2",
            "--length",
            "5",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["tank_dip_toolbox", "--lang", "ko"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.lang.as_deref(), Some("ko"));
    }
}
