use clap::Parser;

fn main() {
    let cli = lcc_drv::Cli::parse();
    if !lcc_drv::run(&cli) {
        std::process::exit(1);
    }
}
