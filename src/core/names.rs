//! Bot naming.
//!
//! Bots pick a name starting with a letter tied to their strategy so a
//! table of bots can be told apart at a glance.

use super::GameRng;

const NAMES: [&[&str]; 26] = [
    &["Ada", "Alonzo", "Astra", "Ambrose", "Aurora"],
    &["Babbage", "Beatrix", "Boris", "Bianca", "Bram"],
    &["Cassius", "Clara", "Cosmo", "Celeste", "Cyrus"],
    &["Dagny", "Dexter", "Delphine", "Dmitri", "Dora"],
    &["Edsger", "Elsa", "Emeric", "Esme", "Ezra"],
    &["Fenna", "Fitz", "Flora", "Florian", "Freya"],
    &["Gideon", "Greta", "Gus", "Gwen", "Grimsby"],
    &["Hedda", "Horace", "Hilda", "Hector", "Hazel"],
    &["Ingrid", "Ivo", "Isolde", "Ignatius", "Iris"],
    &["Juno", "Jasper", "Jolene", "Jerzy", "Jemima"],
    &["Katya", "Knuth", "Kestrel", "Kofi", "Kiri"],
    &["Lovelace", "Lorcan", "Lenore", "Luther", "Lark"],
    &["Mirela", "Magnus", "Maud", "Milo", "Minerva"],
    &["Nadia", "Nestor", "Noor", "Niles", "Nova"],
    &["Odette", "Orson", "Ottoline", "Osric", "Opal"],
    &["Pascal", "Petra", "Perpetua", "Piotr", "Poppy"],
    &["Quinta", "Quentin", "Quill", "Quilla", "Quimby"],
    &["Rosalind", "Rufus", "Renata", "Rolf", "Rhea"],
    &["Sabine", "Silas", "Sunniva", "Stellan", "Saoirse"],
    &["Tamsin", "Thaddeus", "Tova", "Tobias", "Theda"],
    &["Una", "Ulysses", "Umbra", "Uriel", "Undine"],
    &["Vesna", "Valdemar", "Vita", "Virgil", "Violet"],
    &["Wren", "Wilbur", "Winifred", "Wendel", "Wanda"],
    &["Xenia", "Xavi", "Xiomara", "Xerxes", "Xanthe"],
    &["Yelena", "Yorick", "Ysolde", "Yusuf", "Yara"],
    &["Zelda", "Zbigniew", "Zinnia", "Zeno", "Zora"],
];

/// Pick a bot name starting with `initial` that is not already taken.
///
/// Falls back to any letter when every name for `initial` is used, and to a
/// numbered name when the whole table is exhausted.
pub fn bot_name(initial: char, taken: &[String], rng: &mut GameRng) -> String {
    let free = |letter: usize| -> Vec<&'static str> {
        NAMES[letter]
            .iter()
            .copied()
            .filter(|name| !taken.iter().any(|t| t == name))
            .collect()
    };

    let letter = initial.to_ascii_lowercase();
    if letter.is_ascii_lowercase() {
        let names = free((letter as u8 - b'a') as usize);
        if let Some(name) = rng.choose(&names) {
            return (*name).to_string();
        }
    }

    let all: Vec<&'static str> = (0..NAMES.len()).flat_map(free).collect();
    match rng.choose(&all) {
        Some(name) => (*name).to_string(),
        None => format!("Bot {}", taken.len() + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_uses_initial() {
        let mut rng = GameRng::new(3);
        let name = bot_name('p', &[], &mut rng);
        assert!(name.starts_with('P'));
    }

    #[test]
    fn test_name_avoids_taken() {
        let mut rng = GameRng::new(3);
        let taken: Vec<String> = NAMES[15][..4].iter().map(|s| s.to_string()).collect();
        for _ in 0..20 {
            assert_eq!(bot_name('p', &taken, &mut rng), "Poppy");
        }
    }

    #[test]
    fn test_name_falls_back_to_other_letters() {
        let mut rng = GameRng::new(3);
        let taken: Vec<String> = NAMES[16].iter().map(|s| s.to_string()).collect();
        let name = bot_name('q', &taken, &mut rng);
        assert!(!taken.contains(&name));
    }
}
