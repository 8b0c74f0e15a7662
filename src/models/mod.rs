pub mod competition;
pub mod event;
pub mod fixture;
pub mod player;
pub mod row;

pub use competition::{Competition, CompetitionFilter};
pub use event::Event;
pub use fixture::Match;
pub use player::{Player, TopPlayer};
pub use row::{Cell, Row};
