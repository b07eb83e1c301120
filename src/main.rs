use std::env;
use std::process::ExitCode;

use vena::flags::Flags;
use vena::shell::Shell;

fn main() -> ExitCode {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        eprintln!("vena: {}", e);
        flags.print_help();
        return ExitCode::from(2);
    }

    if flags.is_set("help") {
        flags.print_help();
        return ExitCode::SUCCESS;
    }

    if flags.is_set("version") {
        println!("vena {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if let Err(e) = vena::logger::init(flags.is_set("debug")) {
        eprintln!("vena: cannot install logger: {}", e);
    }

    match Shell::new(flags).and_then(|mut shell| shell.run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("vena: {}", e);
            ExitCode::FAILURE
        }
    }
}
