mod session_store;

pub use session_store::{AdpSource, PlayerCatalog, SessionStore, StateStore};
