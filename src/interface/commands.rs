//! Command dispatch.
//!
//! Every line a player types goes through `dispatch`:
//!
//! 1. The first word is expanded through the game's alias table.
//! 2. Game-specific commands (`Game::game_command`) get the first look.
//! 3. Shared commands: `help`, `rules`, `credits`, `quit`, `rpn`.
//! 4. Anything else is parsed as a move and applied.

use crate::core::{GameError, GameRng, PlayerId, Result};
use crate::rules::{CommandReply, Game, TurnStatus};

/// What a dispatched line did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// Text for the acting player only.
    Reply(String),
    /// The game moved on.
    Turn(TurnStatus),
    /// The player quit the game.
    Quit,
}

/// Split a line into a lowercase verb and the untouched remainder.
#[must_use]
pub fn split_verb(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_lowercase(), rest.trim()),
        None => (line.to_lowercase(), ""),
    }
}

/// Expand the verb of `line` through `aliases`, keeping the arguments.
#[must_use]
pub fn expand_alias(line: &str, aliases: &[(&str, &str)]) -> String {
    let (verb, args) = split_verb(line);
    match aliases.iter().find(|(alias, _)| *alias == verb) {
        Some((_, full)) if args.is_empty() => (*full).to_string(),
        Some((_, full)) => format!("{full} {args}"),
        None => line.trim().to_string(),
    }
}

/// Handle one line of player input.
pub fn dispatch<G: Game>(game: &mut G, player: PlayerId, line: &str, rng: &mut GameRng) -> Result<Dispatched> {
    let line = expand_alias(line, game.aliases());
    if line.is_empty() {
        return Err(GameError::Parse(line));
    }
    let (verb, args) = split_verb(&line);

    if let Some(reply) = game.game_command(player, &verb, args) {
        return reply.map(|reply| match reply {
            CommandReply::Text(text) => Dispatched::Reply(text),
            CommandReply::Turn(status) => Dispatched::Turn(status),
        });
    }

    match verb.as_str() {
        "help" => Ok(Dispatched::Reply(help_text(game, args))),
        "rules" => Ok(Dispatched::Reply(game.info().rules.trim().to_string())),
        "credits" => Ok(Dispatched::Reply(game.info().credits.trim().to_string())),
        "quit" | "q" | "!" => Ok(Dispatched::Quit),
        "rpn" => super::rpn::evaluate(args, rng).map(Dispatched::Reply),
        _ => {
            let mv = game.parse_move(player, &line)?;
            tracing::debug!(game = game.info().name, %player, ?mv, "applying move");
            game.apply_move(player, mv).map(Dispatched::Turn)
        }
    }
}

fn help_text<G: Game>(game: &G, topic: &str) -> String {
    let topic = topic.trim().to_lowercase();
    if let Some(text) = game.help(&topic) {
        return text;
    }
    if topic.is_empty() {
        let mut lines = vec![
            format!("You are playing {}.", game.info().name),
            "Shared commands: credits, help <topic>, quit, rpn <expression>, rules.".to_string(),
        ];
        if !game.aliases().is_empty() {
            let aliases: Vec<String> = game
                .aliases()
                .iter()
                .map(|(alias, full)| format!("{alias} = {full}"))
                .collect();
            lines.push(format!("Aliases: {}.", aliases.join(", ")));
        }
        return lines.join("\n");
    }
    match topic.as_str() {
        "rpn" => "rpn <expression>: a reverse Polish calculator, e.g. 'rpn 3 4 + 2 *'.".to_string(),
        "quit" => "quit: stop playing. This counts as a loss.".to_string(),
        _ => "I can't help you with that.".to_string(),
    }
}
