//! A person at a terminal (or anything that looks like one).

use std::io::{BufRead, Write};

use rustc_hash::FxHashMap;

use super::agent::{Agent, Response};
use super::storage::PlayerStore;
use crate::core::{PlayerId, Result};
use crate::rules::Game;

/// Line-oriented agent over any reader and writer.
///
/// One line may answer several prompts: `roll; roll; stop` is held and
/// handed out a part at a time. The first word of every answer is expanded
/// through the player's shortcuts. End of input quits.
pub struct Human<R, W> {
    name: String,
    input: R,
    output: W,
    held: Vec<String>,
    shortcuts: FxHashMap<String, String>,
    store: Option<PlayerStore>,
}

impl<R: BufRead, W: Write> Human<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            held: Vec::new(),
            shortcuts: FxHashMap::default(),
            store: None,
        }
    }

    /// Attach persistent storage and load its shortcuts.
    pub fn with_store(mut self, store: PlayerStore) -> Result<Self> {
        self.shortcuts = store.load_shortcuts()?;
        self.store = Some(store);
        Ok(self)
    }

    /// Define a shortcut for this session (and on disk, if attached).
    pub fn add_shortcut(&mut self, shortcut: &str, text: &str) -> Result<()> {
        if let Some(store) = &self.store {
            store.store_shortcut(shortcut, text)?;
        }
        self.shortcuts.insert(shortcut.to_string(), text.to_string());
        Ok(())
    }

    /// Get the next answer to `prompt`, with shortcuts expanded.
    pub fn ask(&mut self, prompt: &str) -> String {
        if self.held.is_empty() {
            let _ = write!(self.output, "{prompt}");
            let _ = self.output.flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return "quit".to_string(),
                Ok(_) => {}
            }
            let line = line.trim();
            if !line.contains(';') {
                return self.expand(line);
            }
            // Reverse so the next part is popped off the end.
            self.held = line.split(';').rev().map(|part| part.trim().to_string()).collect();
        }
        let answer = self.held.pop().unwrap_or_default();
        self.expand(&answer)
    }

    fn expand(&self, answer: &str) -> String {
        let (first, rest) = answer.split_once(' ').unwrap_or((answer, ""));
        let first = self.shortcuts.get(first).map_or(first, String::as_str);
        format!("{first} {rest}").trim().to_string()
    }

    /// Give back the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<G: Game, R: BufRead, W: Write> Agent<G> for Human<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn respond(&mut self, game: &G, player: PlayerId) -> Response<G::Move> {
        let prompt = game.prompt(player);
        loop {
            let answer = self.ask(&prompt);
            // `shortcut <word> <text...>` is handled here so every game gets it.
            let Some(rest) = answer.strip_prefix("shortcut ") else {
                return Response::Text(answer);
            };
            let reply = match rest.trim().split_once(' ') {
                Some((word, text)) => match self.add_shortcut(word, text.trim()) {
                    Ok(()) => format!("{word} now means {:?}.", text.trim()),
                    Err(error) => error.to_string(),
                },
                None => "Usage: shortcut <word> <text>".to_string(),
            };
            <Self as Agent<G>>::tell(self, &reply);
        }
    }

    fn tell(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }

    fn error(&mut self, message: &str) -> Result<()> {
        let _ = writeln!(self.output, "{message}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn human(text: &str) -> Human<Cursor<Vec<u8>>, Vec<u8>> {
        Human::new("Arthur", Cursor::new(text.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_held_inputs() {
        let mut h = human("roll; roll ;stop\nquit\n");
        assert_eq!(h.ask("? "), "roll");
        assert_eq!(h.ask("? "), "roll");
        assert_eq!(h.ask("? "), "stop");
        assert_eq!(h.ask("? "), "quit");
        let (_, out) = h.into_inner();
        // Only two real prompts were written.
        assert_eq!(String::from_utf8(out).unwrap(), "? ? ");
    }

    #[test]
    fn test_shortcut_expands_first_word() {
        let mut h = human("tt 5 3\n5 tt\n");
        h.add_shortcut("tt", "take").unwrap();
        assert_eq!(h.ask(""), "take 5 3");
        assert_eq!(h.ask(""), "5 tt");
    }

    #[test]
    fn test_eof_quits() {
        let mut h = human("");
        assert_eq!(h.ask("> "), "quit");
    }

    #[test]
    fn test_shortcuts_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlayerStore::open(dir.path(), "a", "b", "c").unwrap();
        let mut h = human("").with_store(store.clone()).unwrap();
        h.add_shortcut("r", "roll").unwrap();
        let mut h = human("r\n").with_store(store).unwrap();
        assert_eq!(h.ask(""), "roll");
    }
}
