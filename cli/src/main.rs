use clap::Parser;

mod form;
use form::ConsoleForm;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Full path to TOML config
    #[clap(short, long, value_parser)]
    config: Option<String>,
}

fn main() {
    let args = Args::parse();
    println!("[helpdesk-agent] Opening a support ticket!");

    // Console frontend, one ticket per run. The closure stands in for the tray
    // hotkey and fires a single activation
    agent::start::start_agent(args.config.as_deref(), ConsoleForm::new, |shell| {
        shell.capture_and_activate();
    });

    println!("[helpdesk-agent] Done!");
}
