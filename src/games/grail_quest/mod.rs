//! Quest for the Grail: provision five knights and ride from Camelot to the
//! Castle Aaaaarrrrrrggghhh before winter.
//!
//! ```
//! use parlor::games::grail_quest::{GrailMove, GrailQuestBuilder, Phase};
//! use parlor::rules::Game;
//! use parlor::PlayerId;
//!
//! let mut quest = GrailQuestBuilder::new().player("Arthur").build(932).unwrap();
//! for gold in [220, 25, 200, 30, 100, 50] {
//!     quest.apply_move(PlayerId::new(0), GrailMove::Buy(gold)).unwrap();
//! }
//! assert_eq!(quest.phase(), Phase::Action);
//! ```

mod events;
mod game;
mod supplies;

pub use events::{FIRST_MOUNTAINS, SECOND_MOUNTAINS};
pub use game::{
    Eating, Ending, GrailMove, GrailOptions, GrailQuest, GrailQuestBuilder, Phase, Tactic, CREDITS_ORDER,
    DETOUR_MILES, HUNTING_ARROWS, INFO, MAX_FORTNIGHTS, QUEST_MILES, STARTING_GOLD,
};
pub use supplies::{Item, QuestDate, Supplies, ARROWS_PER_GOLD};
