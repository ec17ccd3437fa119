// Session state: the editable template, extra items, save slot and word import.

pub mod import;
pub mod persistence;
pub mod store;

pub use persistence::{load_session, save_session};
pub use store::SessionStore;
