//! parlor: play the games at a terminal, or run the Klondike bot over a range
//! of deals.
//!
//! Usage:
//!   parlor list
//!   parlor play pig --name Ichabod --bots knizia,hard
//!   parlor play canfield --variant rainbow --seed 7
//!   parlor play yacht --bots easy,medium --variant "yahtzee strict-full"
//!   parlor sim klondike --from 1 --to 1000
//!
//! Set `RUST_LOG=parlor=debug` to watch the bots think.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use parlor::games::{self, backgammon, canfield, flip, grail_quest, klondike, mate, ninety_nine, pig, sorter, yacht};
use parlor::interface::{seat_agents, Human, Seat};
use parlor::{Agent, Game, GameRng, Outcome, PlayerId, PlayerMap, PlayerStore, Session};

#[derive(Parser)]
#[command(name = "parlor")]
#[command(about = "Text-driven parlor games with computer opponents")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the games by category.
    List,
    /// Play a game.
    Play {
        /// Game name or alias.
        game: String,
        /// Your name at the table.
        #[arg(long, default_value = "Player")]
        name: String,
        /// Your quest, which keeps your data separate from others of the same name.
        #[arg(long, default_value = "to play games")]
        quest: String,
        /// Your favorite color.
        #[arg(long, default_value = "blue")]
        color: String,
        /// Seed for the game; random if not given.
        #[arg(long)]
        seed: Option<u64>,
        /// Bots to play against (strategies, styles, or just a count of names).
        #[arg(long, value_delimiter = ',')]
        bots: Vec<String>,
        /// Game variant or option.
        #[arg(long, default_value = "")]
        variant: String,
        /// Games to play in a row. Pig rematches start with the loser.
        #[arg(long, default_value_t = 1)]
        rounds: u32,
        /// Where results and shortcuts are kept.
        #[arg(long, env = "PARLOR_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Run a bot over a range of deals.
    Sim {
        game: String,
        #[arg(long, default_value_t = 1)]
        from: u64,
        #[arg(long, default_value_t = 100)]
        to: u64,
    },
}

/// The person at the keyboard and where their results go.
struct Player {
    name: String,
    store: Option<PlayerStore>,
}

impl Player {
    fn agent<'a, G: Game + 'a>(&self) -> anyhow::Result<Box<dyn Agent<G> + 'a>> {
        let human = Human::new(self.name.clone(), io::stdin().lock(), io::stdout());
        Ok(match &self.store {
            Some(store) => Box::new(human.with_store(store.clone())?),
            None => Box::new(human),
        })
    }

    fn taken(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::List => list(),
        Command::Play { game, name, quest, color, seed, bots, variant, rounds, data_dir } => {
            let store = data_dir
                .map(|dir| PlayerStore::open(dir, &name, &quest, &color))
                .transpose()
                .context("could not open the player data folder")?;
            let player = Player { name, store };
            let seed = seed.unwrap_or_else(|| GameRng::from_entropy().seed());
            let info = games::find(&game).with_context(|| format!("no game called {game:?}"))?;
            tracing::info!(game = info.name, seed, "starting");
            let outcome = play(info.name, &player, seed, &bots, &variant, rounds)?;
            println!("\nResult for {}: {outcome}", player.name);
            if let Some(store) = &player.store {
                store.store_result(info.name, outcome, 0)?;
            }
            Ok(())
        }
        Command::Sim { game, from, to } => {
            if !klondike::INFO.matches(&game) {
                bail!("only Klondike can be simulated");
            }
            let wins = klondike::simulate(from, to)?;
            let total = to.saturating_sub(from) + 1;
            println!("Klonbot won {} of {} deals.", wins.len(), total);
            for deal in wins {
                println!("{deal}");
            }
            Ok(())
        }
    }
}

fn list() -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    let mut categories: Vec<_> = games::catalogue().iter().flat_map(|info| info.categories.iter().copied()).collect();
    categories.sort_by_key(ToString::to_string);
    categories.dedup();
    for category in categories {
        writeln!(out, "{category}:")?;
        for info in games::by_category(category) {
            if info.aka.is_empty() {
                writeln!(out, "    {}", info.name)?;
            } else {
                writeln!(out, "    {} ({})", info.name, info.aka.join(", "))?;
            }
        }
    }
    Ok(())
}

fn play(name: &str, player: &Player, seed: u64, bots: &[String], variant: &str, rounds: u32) -> anyhow::Result<Outcome> {
    let mut rng = GameRng::new(seed).for_context("bots");
    let mut taken = player.taken();
    match name {
        "Backgammon" => {
            let bot = backgammon::BackgammonBot::new(&taken, &mut rng);
            let game = backgammon::BackgammonBuilder::new().players(player.name.clone(), bot.name()).build(seed)?;
            let (agents, human) = seat_agents(vec![Seat::Human, Seat::Bot(bot)], player.agent::<backgammon::Backgammon>()?);
            run_seated(game, agents, human, seed)
        }
        "Canfield" => {
            let variant = variant.parse::<canfield::CanfieldVariant>()?;
            let game = canfield::CanfieldBuilder::new().player(player.name.clone()).variant(variant).build(seed)?;
            run(game, player.agent()?, seed)
        }
        "Klondike" => {
            let mut builder = klondike::KlondikeBuilder::new().player(player.name.clone());
            for option in variant.split_whitespace() {
                builder = match option {
                    "turn-one" => builder.turn_one(),
                    "switch-one" => builder.switch_one(),
                    other => bail!("unknown Klondike option {other:?}"),
                };
            }
            run(builder.build(seed)?, player.agent()?, seed)
        }
        "Mate" => {
            let style = match bots.first().map(String::as_str) {
                None | Some("defend") => mate::MateStyle::Defend,
                Some("attack") => mate::MateStyle::Attack,
                Some("random") => mate::MateStyle::Random,
                Some(other) => bail!("unknown Mate bot {other:?}"),
            };
            let bot = mate::MateBot::new(style, &taken, &mut rng);
            let game = mate::MateBuilder::new().players(player.name.clone(), bot.name()).build(seed);
            let (agents, human) = seat_agents(vec![Seat::Human, Seat::Bot(bot)], player.agent::<mate::Mate>()?);
            run_seated(game, agents, human, seed)
        }
        "Ninety-Nine" => {
            let count = if bots.is_empty() { 3 } else { bots.len() };
            let mut seats = vec![Seat::Human];
            for _ in 0..count {
                let bot = ninety_nine::Bot99::new(&taken, &mut rng);
                taken.push(bot.name().to_string());
                seats.push(Seat::Bot(bot));
            }
            let mut builder = ninety_nine::NinetyNineBuilder::new().players(taken);
            match variant {
                "" => {}
                "face-nine" => builder = builder.nine_to_99(false),
                other => bail!("unknown Ninety-Nine option {other:?}"),
            }
            let (agents, human) = seat_agents(seats, player.agent::<ninety_nine::NinetyNine>()?);
            run_seated(builder.build(seed)?, agents, human, seed)
        }
        "Pig" => {
            let specs = if bots.is_empty() { vec!["medium".to_string()] } else { bots.to_vec() };
            let mut seats = vec![Seat::Human];
            for spec in &specs {
                let bot = pig::PigBot::from_spec(spec, &taken, &mut rng)?;
                taken.push(bot.name().to_string());
                seats.push(Seat::Bot(bot));
            }
            let mut builder = pig::PigBuilder::new().players(taken);
            for option in variant.split_whitespace() {
                builder = match option.split_once('=') {
                    Some(("shuffle", repeats)) => builder.shuffle(repeats.parse().context("shuffle needs a number")?),
                    None if option == "six-bad" => builder.six_bad(true),
                    None if option == "even-turns" => builder.even_turns(true),
                    _ => bail!("unknown Pig option {option:?}"),
                };
            }
            let (mut agents, human) = seat_agents(seats, player.agent::<pig::Pig>()?);
            let mut game = builder.build(seed)?;
            println!("{}", game.info().rules.trim());
            let mut total = Outcome::default();
            for round in 0..rounds.max(1) {
                if round > 0 {
                    game = game.rematch(seed.wrapping_add(u64::from(round)))?;
                    println!("\nRematch {round}: {} goes first.", game.player_name(game.current_player()));
                }
                let mut session = Session::new(game, agents, human, seed)?;
                let outcome = session.play()?;
                println!("Game {}: {outcome}", round + 1);
                total += outcome;
                (game, agents) = session.into_parts();
            }
            io::stdout().flush()?;
            Ok(total)
        }
        "Yacht" => {
            let styles = if bots.is_empty() { vec!["easy".to_string(), "medium".to_string()] } else { bots.to_vec() };
            let mut seats = vec![Seat::Human];
            for style in &styles {
                let bot = yacht::YachtBot::from_spec(style, &taken, &mut rng)?;
                taken.push(bot.name().to_string());
                seats.push(Seat::Bot(bot));
            }
            let mut options = yacht::YachtOptions::default();
            for option in variant.split_whitespace() {
                options.apply(option)?;
            }
            let game = yacht::YachtBuilder::new().players(taken).options(options).build(seed)?;
            let (agents, human) = seat_agents(seats, player.agent::<yacht::Yacht>()?);
            run_seated(game, agents, human, seed)
        }
        "Quest for the Grail" => {
            let mut builder = grail_quest::GrailQuestBuilder::new().player(player.name.clone());
            if let Some(skill) = variant.strip_prefix("skill=") {
                builder = builder.skill(skill.parse().context("skill needs a number from 1 to 5")?);
            }
            run(builder.build(seed)?, player.agent()?, seed)
        }
        "Flip" => {
            let bot = flip::FlipBot::new(&taken, seed);
            let game = flip::FlipBuilder::new().players(player.name.clone(), bot.name()).build(seed)?;
            let seats = if game.seat_of(&player.name) == Some(PlayerId::new(1)) {
                vec![Seat::Bot(bot), Seat::Human]
            } else {
                vec![Seat::Human, Seat::Bot(bot)]
            };
            let (agents, human) = seat_agents(seats, player.agent::<flip::Flip>()?);
            run_seated(game, agents, human, seed)
        }
        "Sorter" => {
            let mut builder = sorter::SorterBuilder::new().player(player.name.clone());
            if let Some(length) = variant.strip_prefix("length=") {
                builder = builder.length(length.parse().context("length needs a number")?);
            }
            run(builder.build(seed)?, player.agent()?, seed)
        }
        other => bail!("{other} cannot be played from the command line"),
    }
}

/// A solitaire game with the human in the only seat.
fn run<'a, G: Game>(game: G, human: Box<dyn Agent<G> + 'a>, seed: u64) -> anyhow::Result<Outcome> {
    run_seated(game, PlayerMap::from_vec(vec![human]), PlayerId::new(0), seed)
}

fn run_seated<'a, G: Game>(
    game: G,
    agents: PlayerMap<Box<dyn Agent<G> + 'a>>,
    human: PlayerId,
    seed: u64,
) -> anyhow::Result<Outcome> {
    println!("{}", game.info().rules.trim());
    let mut session = Session::new(game, agents, human, seed)?;
    let outcome = session.play()?;
    io::stdout().flush()?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_data_dir_from_environment() {
        std::env::set_var("PARLOR_DATA_DIR", "/tmp/parlor-data");
        let args = Args::try_parse_from(["parlor", "play", "pig", "--bots", "easy,knizia", "--rounds", "3"]);
        std::env::remove_var("PARLOR_DATA_DIR");
        match args.unwrap().command {
            Command::Play { data_dir, rounds, bots, .. } => {
                assert_eq!(data_dir, Some(PathBuf::from("/tmp/parlor-data")));
                assert_eq!(rounds, 3);
                assert_eq!(bots, vec!["easy".to_string(), "knizia".to_string()]);
            }
            _ => panic!("expected the play command"),
        }
    }
}
