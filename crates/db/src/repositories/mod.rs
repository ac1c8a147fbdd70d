mod player_catalog;
mod session_store;

pub use player_catalog::{SqlAdpSource, SqlPlayerCatalog};
pub use session_store::SqlSessionStore;
