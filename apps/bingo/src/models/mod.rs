pub mod card;
pub mod content;
pub mod settings;
