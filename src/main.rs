//! Main CLI interface to Challenger engine.

use std::io::{self, Write};
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use challenger_engine::coretypes::PlyKind;
use challenger_engine::engine::{Engine, EngineBuilder};
use challenger_engine::fen::Fen;
use challenger_engine::search::{DepthPolicy, DEFAULT_DEPTH};
use challenger_engine::uci::{self, UciCommand, UciInfo, UciResponse};

const NAME: &str = concat!("Challenger ", env!("CARGO_PKG_VERSION"));
const AUTHOR: &str = "Challenger developers";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum PolicyArg {
    /// Search every position to the same depth.
    Fixed,
    /// Pick the depth from material, mobility and the clock.
    Heuristic,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// How the search depth is chosen.
    #[arg(long, value_enum, default_value_t = PolicyArg::Fixed)]
    depth_policy: PolicyArg,

    /// Depth in plies used by the fixed policy.
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: PlyKind,

    /// Enable debug logging and UCI debug strings.
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn policy(&self) -> DepthPolicy {
        match self.depth_policy {
            PolicyArg::Fixed => DepthPolicy::Fixed(self.depth),
            PolicyArg::Heuristic => DepthPolicy::Heuristic,
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Stdout carries only UCI responses, so logs go to stderr.
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    let engine = EngineBuilder::new()
        .policy(args.policy())
        .debug(args.debug)
        .build();
    log::info!("{NAME} starting with {:?}", engine.policy());

    run(engine)
}

/// Read UCI commands from stdin until `quit` or end of input.
fn run(mut engine: Engine) -> io::Result<()> {
    let stdin = io::stdin();
    loop {
        // Wait to receive a line of input.
        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        if input.trim().is_empty() {
            continue;
        }

        // Attempt to parse an input string into a UciCommand for processing.
        let command = match UciCommand::from_str(&input) {
            Ok(command) => command,
            Err(err) => {
                log::warn!("{} could not be parsed: {err}", input.trim_end().escape_debug());
                uci::error(&err.to_string())?;
                continue;
            }
        };

        match command {
            // GUI is telling engine to use UCI protocol.
            // It requires a response of Id and an acknowledgement.
            UciCommand::Uci => {
                UciResponse::new_id(NAME, AUTHOR).send()?;
                UciResponse::UciOk.send()?;
            }

            // Command used to sync GUI with engine. Requires acknowledgement response.
            UciCommand::IsReady => UciResponse::ReadyOk.send()?,

            // The next search will be from a different game.
            UciCommand::UciNewGame => {
                engine.new_game();
                uci::debug(engine.debug(), "new game")?;
            }

            // Searches run to completion before the next command is read.
            UciCommand::Stop => {}

            UciCommand::Quit => break,

            // Tells engine to send extra `info string` to the GUI.
            UciCommand::Debug(new_debug_value) => {
                uci::debug(
                    engine.debug() | new_debug_value,
                    &format!("set debug {new_debug_value}"),
                )?;
                engine.set_debug(new_debug_value);
            }

            // Set the current position.
            UciCommand::Pos(new_position) => {
                uci::debug(engine.debug(), &format!("set position {}", new_position.to_fen()))?;
                if let Some(result) = new_position.game_result() {
                    log::info!("position is already over: {result}");
                }
                engine.set_position(new_position);
            }

            // Search the current position and answer with the best move.
            UciCommand::Go(controls) => {
                let timer = controls.timer(engine.position().player());
                let result = engine.search_current(&timer, controls.policy());

                match result {
                    Some(result) => {
                        UciResponse::new_info(UciInfo::from(&result)).send()?;
                        UciResponse::new_best_move(Some(result.best_move)).send()?;
                    }
                    None => {
                        match engine.position().game_result() {
                            Some(result) => log::warn!("go received after the game ended: {result}"),
                            None => log::warn!("go received for a position without legal moves"),
                        }
                        UciResponse::new_best_move(None).send()?;
                    }
                }
            }
        }
    }

    Ok(())
}
