use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use newtca::capabilities::Environment;
use newtca::cli::{parse_command, Args, Input, Screen, HELP};
use newtca::features::root::{RootReducer, RootState};
use newtca::logging::init_tracing;
use newtca::mvi::Store;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = args.load_config().context("failed to load configuration")?;
    let env = if args.offline {
        Environment::offline(&config)
    } else {
        Environment::live(&config).context("failed to set up the fact client")?
    };

    let store = Store::new(RootState::default(), RootReducer::new(env));
    let mut screen = store.observe(Screen::of);
    print_screen(screen.current())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match parse_command(&line, &store.state()) {
                    Ok(None) => {}
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(Input::Help)) => println!("{HELP}"),
                    Ok(Some(Input::PrintState)) => {
                        println!("{}", serde_json::to_string_pretty(&store.state())?);
                    }
                    Ok(Some(Input::Send(action))) => store.send(action)?,
                    Err(e) => eprintln!("{e}"),
                }
            }
            changed = screen.changed() => match changed {
                Some(next) => print_screen(&next)?,
                None => break,
            },
        }
    }

    store.shutdown().await;
    Ok(())
}

fn print_screen(screen: &Screen) -> Result<()> {
    println!("{}", screen.to_json()?);
    Ok(())
}
