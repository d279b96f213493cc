use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
    #[clap(value_parser, help = "The binding definition file")]
    pub input: PathBuf,

    #[clap(long, help = "Write the native glue code here instead of stdout")]
    pub native_out: Option<PathBuf>,

    #[clap(long, help = "Write the managed proxy code here instead of stdout")]
    pub managed_out: Option<PathBuf>,
}
