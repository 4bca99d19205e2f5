//! Universal Chess Interface

use std::fmt::{self, Display, Write};
use std::io;
use std::str::{FromStr, SplitWhitespace};
use std::time::Duration;

use crate::coretypes::{Color, Cp, Move, PlyKind};
use crate::error::{self, ErrorKind};
use crate::fen::Fen;
use crate::search::{DepthPolicy, SearchResult};
use crate::timeman::Timer;
use crate::Position;

/// UciCommands commands from an external program sent to this chess engine.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum UciCommand {
    Uci,
    Debug(bool),
    IsReady,
    UciNewGame,
    /// Position after all listed moves were applied. Earlier positions are kept
    /// in its history so repetitions can be found.
    Pos(Position),
    Go(SearchControls),
    Stop,
    Quit,
}

impl UciCommand {
    /// Parse a single input line into a UciCommand if possible.
    pub fn parse_command(input_str: &str) -> error::Result<Self> {
        let mut input = input_str.split_whitespace();
        let head = input.next().ok_or(ErrorKind::UciNoCommand)?;

        match head {
            "uci" => Ok(UciCommand::Uci),
            "debug" => Self::parse_debug(input),
            "isready" => Ok(UciCommand::IsReady),
            "ucinewgame" => Ok(UciCommand::UciNewGame),
            "position" => Self::parse_pos(input),
            "go" => Self::parse_go(input),
            "stop" => Ok(UciCommand::Stop),
            "quit" => Ok(UciCommand::Quit),
            _ => Err((ErrorKind::UciUnknownCommand, head).into()),
        }
    }

    /// Extract a `debug` command if possible.
    /// command: `debug [on | off]`
    fn parse_debug(mut input: SplitWhitespace) -> error::Result<Self> {
        let debug_mode_str = input.next().ok_or(ErrorKind::UciDebugNoMode)?;

        match debug_mode_str {
            "on" => Ok(Self::Debug(true)),
            "off" => Ok(Self::Debug(false)),
            _ => Err((ErrorKind::UciDebugIllegalMode, debug_mode_str).into()),
        }
    }

    /// Extract a `position` command if possible.
    /// command: `position [fen fen_str | startpos] (moves move_list ...)`
    fn parse_pos(mut input: SplitWhitespace) -> error::Result<Self> {
        let position_input = input.next().ok_or((
            ErrorKind::UciNoArgument,
            "position missing description [fen | startpos]",
        ))?;

        let mut position = match position_input {
            "startpos" => match input.next() {
                None | Some("moves") => Position::start_position(),
                Some(other) => return Err((ErrorKind::UciPositionMalformed, other).into()),
            },
            "fen" => {
                // Fen fields run until the optional `moves` token, which is consumed.
                let fen_fields: Vec<&str> =
                    input.by_ref().take_while(|&token| token != "moves").collect();
                Position::parse_fen(&fen_fields.join(" "))?
            }
            _ => return Err((ErrorKind::UciPositionMalformed, position_input).into()),
        };

        for move_str in input {
            let move_ = position.parse_move(move_str)?;
            position.make_move(move_);
        }
        Ok(UciCommand::Pos(position))
    }

    /// Extract a `go` command if possible.
    /// command: `go [wtime | btime | winc | binc | movestogo | depth | movetime | infinite]*`
    fn parse_go(mut input: SplitWhitespace) -> error::Result<Self> {
        let mut controls = SearchControls::new();

        while let Some(input_str) = input.next() {
            match input_str {
                "wtime" => controls.wtime = Some(parse_argument(&mut input)?),
                "btime" => controls.btime = Some(parse_argument(&mut input)?),
                "winc" => controls.winc = Some(parse_argument(&mut input)?),
                "binc" => controls.binc = Some(parse_argument(&mut input)?),
                "movestogo" => controls.moves_to_go = Some(parse_argument(&mut input)?),
                "depth" => controls.depth = Some(parse_argument(&mut input)?),
                "movetime" => controls.move_time = Some(parse_argument(&mut input)?),
                "infinite" => controls.infinite = true,
                _ => return Err((ErrorKind::UciInvalidOption, input_str).into()),
            }
        }

        Ok(UciCommand::Go(controls))
    }
}

impl FromStr for UciCommand {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        Self::parse_command(s)
    }
}

/// Parse the integer following a `go` key.
fn parse_argument<T: FromStr>(input: &mut SplitWhitespace) -> error::Result<T>
where
    T::Err: Display,
{
    input
        .next()
        .ok_or(ErrorKind::UciNoArgument)?
        .parse()
        .map_err(|err: T::Err| (ErrorKind::UciCannotParseInt, err).into())
}

/// Limits sent with a `go` command.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Hash)]
pub struct SearchControls {
    pub wtime: Option<i64>,
    pub btime: Option<i64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub moves_to_go: Option<u32>,
    pub depth: Option<PlyKind>,
    pub move_time: Option<u64>,
    pub infinite: bool,
}

impl SearchControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock of the player to move. Without a clock for that player the timer is unlimited.
    /// A negative clock counts as no time left.
    pub fn timer(&self, player: Color) -> Timer {
        if self.infinite {
            return Timer::unlimited();
        }
        if let Some(move_time) = self.move_time {
            return Timer::from_millis(move_time);
        }
        let clock = |time: Option<i64>| {
            time.map(|millis| Duration::from_millis(millis.max(0).unsigned_abs()))
                .unwrap_or(Duration::MAX)
        };
        Timer::for_player(clock(self.wtime), clock(self.btime), player)
    }

    /// Depth policy of this search, when the command fixes one.
    pub fn policy(&self) -> Option<DepthPolicy> {
        self.depth.map(DepthPolicy::Fixed)
    }
}

/// Search report sent as a UCI `info` line.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UciInfo {
    pub depth: PlyKind,
    pub score: Cp,
    pub mate_in: Option<i32>,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u128,
    pub best_move: Move,
}

impl From<&SearchResult> for UciInfo {
    fn from(result: &SearchResult) -> Self {
        Self {
            depth: result.depth,
            score: result.score,
            mate_in: result.mate_in(),
            nodes: result.nodes,
            nps: result.nps() as u64,
            time_ms: result.elapsed.as_millis(),
            best_move: result.best_move,
        }
    }
}

impl Display for UciInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "info depth {} score ", self.depth)?;
        match self.mate_in {
            Some(moves) => write!(f, "mate {moves}")?,
            None => write!(f, "cp {}", self.score.0)?,
        }
        write!(
            f,
            " nodes {} nps {} time {} pv {}",
            self.nodes, self.nps, self.time_ms, self.best_move
        )
    }
}

/// Engine to external program communication.
#[derive(Debug, Clone)]
pub enum UciResponse {
    Id(String, String),
    UciOk,
    ReadyOk,
    /// Best move of a search, or None if the position has no legal moves.
    BestMove(Option<Move>),
    Info(UciInfo),
}

impl UciResponse {
    pub fn new_id(name: &str, author: &str) -> Self {
        Self::Id(name.into(), author.into())
    }

    pub fn new_best_move(move_: Option<Move>) -> Self {
        Self::BestMove(move_)
    }

    pub fn new_info(uci_info: UciInfo) -> Self {
        Self::Info(uci_info)
    }

    /// Send this UciResponse over stdout.
    pub fn send(&self) -> io::Result<()> {
        write_stdout(&self.to_string())
    }
}

impl Display for UciResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Id(name, author) => {
                f.write_str("id name ")?;
                f.write_str(name)?;
                f.write_char('\n')?;
                f.write_str("id author ")?;
                f.write_str(author)?;
                f.write_char('\n')
            }
            Self::UciOk => f.write_str("uciok\n"),
            Self::ReadyOk => f.write_str("readyok\n"),
            Self::BestMove(Some(move_)) => writeln!(f, "bestmove {move_}"),
            Self::BestMove(None) => f.write_str("bestmove 0000\n"),
            Self::Info(info) => writeln!(f, "{info}"),
        }
    }
}

/// Send a debug info string over UCI.
pub fn debug(can_debug: bool, s: &str) -> io::Result<()> {
    match can_debug {
        true => write_stdout(&format!("info string debug {s}\n")),
        false => Ok(()),
    }
}

/// Send an error info string over UCI.
pub fn error(s: &str) -> io::Result<()> {
    write_stdout(&format!("info string error {s}\n"))
}

fn write_stdout(s: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    <io::StdoutLock as io::Write>::write_all(&mut handle, s.as_bytes())?;
    <io::StdoutLock as io::Write>::flush(&mut handle)
}
