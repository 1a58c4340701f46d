pub mod artwork;
pub mod catalog;
pub mod enrichment;
pub mod query;
pub mod watchlist;

pub use artwork::{ArtworkResolver, ArtworkSource, FanartClient};
pub use catalog::MovieCatalog;
pub use query::{MovieQuery, SortOrder};
pub use watchlist::WatchlistManager;
