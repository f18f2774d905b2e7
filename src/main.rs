//! Interactive text chess game.
//!
//! Run with:
//! `cargo run --release -- --bot-side dark --depth 3`
//!
//! Type moves in SAN (`e4`, `Nbd2`, `O-O`, `exd6`, `a8=Q`). Each accepted
//! move ends the turn. `help` lists the other commands.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use slate_chess::chess_errors::MoveError;
use slate_chess::game_state::chess_rules::DEFAULT_SEARCH_DEPTH;
use slate_chess::game_state::chess_types::{Board, PieceKind, Side};
use slate_chess::move_generation::legal_move_apply::TurnOutcome;
use slate_chess::search::minimax::SearchConfig;
use slate_chess::session::{BotKind, GameEvent, GameMode, GameSession, SessionConfig};
use slate_chess::utils::algebraic::algebraic_to_square;
use slate_chess::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineArg {
    Minimax,
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Slate: a text chess game with a minimax bot", version)]
struct CmdArgs {
    /// Side played by the bot; omit for a two-player game
    #[arg(long, env = "SLATE_BOT_SIDE", value_enum)]
    bot_side: Option<SideArg>,

    /// Bot search depth in plies
    #[arg(long, env = "SLATE_DEPTH", default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u8,

    /// Bot strategy
    #[arg(long, env = "SLATE_ENGINE", value_enum, default_value = "minimax")]
    engine: EngineArg,

    /// Start from this FEN instead of the standard position
    #[arg(long, value_name = "FEN")]
    fen: Option<String>,
}

impl CmdArgs {
    fn session_config(&self) -> SessionConfig {
        let mode = match self.bot_side {
            Some(SideArg::Light) => GameMode::VersusBot {
                bot_side: Side::Light,
            },
            Some(SideArg::Dark) => GameMode::VersusBot {
                bot_side: Side::Dark,
            },
            None => GameMode::TwoPlayer,
        };
        let bot = match self.engine {
            EngineArg::Minimax => BotKind::Minimax,
            EngineArg::Random => BotKind::Random,
        };
        SessionConfig {
            mode,
            bot,
            search: SearchConfig { depth: self.depth },
        }
    }
}

const HELP: &str = "\
commands:
  <san>          play a move, e.g. e4, Nf3, O-O, exd6, a8=Q
  moves <square> list legal destinations of the piece on <square>
  board          show the board
  history        show the moves played so far
  fen [FEN]      print the position, or load one
  code           relay code of the last move
  new            start over
  quit           leave";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cmd_args = CmdArgs::parse();
    let config = cmd_args.session_config();
    let board = match &cmd_args.fen {
        Some(fen) => Board::from_fen(fen)?,
        None => Board::new_game(),
    };

    let (mut session, mut events) = start_session(board, config);
    let mut awaiting_promotion = false;

    println!("{}", render_game_state(session.board()));
    println!("type `help` for commands");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if !session.is_over() && session.is_bot_turn() {
            match session.play_bot_turn() {
                Ok(Some(_)) => {}
                Ok(None) => {
                    println!("the bot has no move");
                    break;
                }
                Err(e) => {
                    eprintln!("bot failed: {e}");
                    break;
                }
            }
            drain_events(&events, &mut awaiting_promotion);
            println!("{}", render_game_state(session.board()));
            continue;
        }

        if awaiting_promotion {
            print!("promote to (q, r, b, n)> ");
        } else if session.is_over() {
            print!("game over (new / quit)> ");
        } else {
            print!("{} to move> ", session.board().active_side);
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if awaiting_promotion {
            let Some(kind) = input.chars().next().and_then(PieceKind::from_letter) else {
                println!("unknown piece `{input}`");
                continue;
            };
            match session.choose_promotion(kind) {
                Ok(_) => {
                    awaiting_promotion = false;
                    finish_turn(&mut session);
                }
                Err(e) => println!("{e}"),
            }
            drain_events(&events, &mut awaiting_promotion);
            continue;
        }

        let (command, rest) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(c, r)| (c, r.trim()));

        match command {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "board" => println!("{}", render_game_state(session.board())),
            "history" => println!("{}", session.board().move_history.join(" ")),
            "code" => match session.last_move_code() {
                Some(code) => println!("{code}"),
                None => println!("no move yet"),
            },
            "fen" if rest.is_empty() => println!("{}", session.board().get_fen()),
            "fen" => match Board::from_fen(rest) {
                Ok(board) => {
                    (session, events) = start_session(board, config);
                    println!("{}", render_game_state(session.board()));
                }
                Err(e) => println!("{e}"),
            },
            "new" => {
                session.restart();
                awaiting_promotion = false;
                println!("{}", render_game_state(session.board()));
            }
            "moves" => match algebraic_to_square(rest) {
                Ok(square) => {
                    let targets: Vec<String> = slate_chess::api::legal_moves(session.board(), square)
                        .iter()
                        .map(ToString::to_string)
                        .collect();
                    println!("{}", targets.join(" "));
                }
                Err(e) => println!("{e}"),
            },
            _ => match session.submit_san(input) {
                Ok(_) => {
                    finish_turn(&mut session);
                    println!("{}", render_game_state(session.board()));
                }
                Err(MoveError::PromotionRequired { .. }) => {}
                Err(e) => println!("{e}"),
            },
        }

        drain_events(&events, &mut awaiting_promotion);
    }

    Ok(())
}

fn start_session(board: Board, config: SessionConfig) -> (GameSession, Receiver<GameEvent>) {
    let mut session = GameSession::with_board(board, config);
    let (tx, rx) = mpsc::channel();
    session.set_event_sender(tx);
    (session, rx)
}

fn finish_turn(session: &mut GameSession) {
    if let Err(e) = session.end_turn() {
        println!("{e}");
    }
}

fn drain_events(events: &Receiver<GameEvent>, awaiting_promotion: &mut bool) {
    for event in events.try_iter() {
        match event {
            GameEvent::MoveCommitted(record) => {
                println!("{} plays {}", record.piece.side, record.san);
            }
            GameEvent::PromotionChoiceNeeded { from, to } => {
                println!("pawn {from}-{to} promotes");
                *awaiting_promotion = true;
            }
            GameEvent::TurnEnded(TurnOutcome::Check { side }) => println!("{side} is in check"),
            GameEvent::TurnEnded(_) => {}
            GameEvent::GameOver(TurnOutcome::Checkmate { winner }) => {
                println!("checkmate, {winner} wins");
            }
            GameEvent::GameOver(outcome) => println!("game over: {outcome:?}"),
        }
    }
}
