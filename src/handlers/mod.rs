pub mod cars;
pub mod health;
