pub mod export;
pub mod form;
pub mod health;
