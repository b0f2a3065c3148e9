//! Lower graph transformation rules and print them.

use clap::Parser;
use gpcheck::{process, Error, Opt};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = Opt::parse();
    process::run(&opt)
}
