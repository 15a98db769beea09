pub mod orders;
pub mod overview;
pub mod products;
pub mod search;
pub mod settings;
