pub mod canon;
pub mod cli;
pub mod codegen;
pub mod error;
pub mod resolve;
pub mod schema;

use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
