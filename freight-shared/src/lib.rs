pub mod pii;
pub mod page;

pub use page::{Page, PageError};
pub use pii::Masked;
