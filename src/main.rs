use clap::Parser;
use destrier::{Cli, Engine};

fn main() {
    let cli = Cli::parse();

    let result = Engine::new(cli.size.map(usize::from)).and_then(|mut engine| engine.run());

    if let Err(e) = result {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
        std::process::exit(1);
    }
}
