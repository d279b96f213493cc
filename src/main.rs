mod cli;

use std::path::Path;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();

    let bindings = match bindings_generator::compile_file(&cli.input) {
        Ok(bindings) => bindings,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };

    emit(cli.native_out.as_deref(), &bindings.native_glue);
    emit(cli.managed_out.as_deref(), &bindings.managed_proxies);
}

fn emit(target: Option<&Path>, text: &str) {
    match target {
        Some(path) => {
            if let Err(error) = std::fs::write(path, text) {
                eprintln!("error: failed to write {}: {error}", path.display());
                std::process::exit(1);
            }
        }
        None => print!("{text}"),
    }
}
