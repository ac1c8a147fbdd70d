mod draft_event;
mod draft_pick;
mod draft_session;
mod draft_state;
mod player;
mod recommendation;
mod settings;

pub use draft_event::{DraftEvent, DraftEventKind};
pub use draft_pick::DraftPick;
pub use draft_session::{DraftKind, DraftSession, SessionStatus};
pub use draft_state::{DraftState, DRAFT_STATE_VERSION};
pub use player::Player;
pub use recommendation::Recommendation;
pub use settings::{KeeperPlayer, RosterSlots, ScoringType, Settings};
