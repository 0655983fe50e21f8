use std::process::ExitCode;

use dolartoday::run;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let err_code = run();
    if err_code != 0 {
        return ExitCode::from(err_code as u8);
    }
    ExitCode::SUCCESS
}
