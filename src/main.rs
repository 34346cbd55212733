use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tank_dip_toolbox::cli::Cli;
use tank_dip_toolbox::i18n::{self, Translator};
use tank_dip_toolbox::{app, config};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut cfg = match config::load_from(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            let tr = Translator::new(&i18n::resolve_language(cli.lang.as_deref(), None));
            eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            return ExitCode::FAILURE;
        }
    };
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, Path::new(i18n::LOCALE_DIR));

    let result = match cli.command {
        Some(command) => app::run_command(command, &cfg, &tr),
        None => app::run(&mut cfg, &cli.config, &tr),
    };
    if let Err(err) = result {
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
