pub mod redirector;
pub mod shortener;

pub use redirector::{RedirectOutcome, Redirector};
pub use shortener::Shortener;
