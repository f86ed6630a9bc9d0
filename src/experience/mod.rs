//! Learned experience: keyed win/loss/tie tallies with a blended score.
//!
//! ## Text Format
//!
//! One record per line:
//!
//! ```text
//! <key>#<wins>-<losses>-<ties>#<score>
//! X-O----X-#4-1-0#0.6723
//! 0#-----OX--XO-----#0b#2-0-1#0.58
//! ```
//!
//! Lines are split from the right, so keys may themselves contain `#`.
//!
//! ## Blending
//!
//! Every finished game moves a record's score toward the outcome value
//! (1 win, 0 loss, 0.5 tie): `score = score * (1 - alpha) + value * alpha`.
//! New records start at 0.5.

mod record;
mod storage;
mod store;

pub use record::{Record, DEFAULT_ALPHA, INITIAL_SCORE};
pub use storage::{ExperienceStorage, FileStorage, InMemoryStorage};
pub use store::{ExperienceStore, LoadReport};
