pub mod deck;
pub mod format;
pub mod preview;

pub use deck::{variance_bullet, Slide, SlideDeck, SlideLayout, DECK_FILE_NAME};
pub use format::thousands;
pub use preview::{preview, PreviewRow, PREVIEW_COLUMNS};
