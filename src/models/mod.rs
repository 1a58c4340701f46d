pub mod artwork;
pub mod movie;
pub mod view;
pub mod watchlist;

pub use artwork::{ArtworkCategory, ArtworkDocument, ArtworkImage, ArtworkUrls};
pub use movie::{Movie, NewMovie};
pub use view::{CatalogPage, MovieDetail, MovieView, WatchlistItemView};
pub use watchlist::{WatchlistEntry, WatchlistItem};
