use busrom::frontend::command::{self, CommandRoot};
use structopt::StructOpt;

fn main() {
    command::terminal_init();
    env_logger::init();

    if let Err(err) = command::root(CommandRoot::from_args()) {
        eprintln!("{} {:#}", ansi_term::Colour::Red.paint("error:"), err);
        std::process::exit(1);
    }
}
