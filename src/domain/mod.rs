pub mod article;
pub mod entry;
pub mod page;

pub use article::Article;
pub use entry::{Entry, EntryId, EntryList};
