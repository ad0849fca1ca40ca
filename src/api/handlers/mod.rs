pub mod dicas;
pub mod health;
pub mod temas;
pub mod users;
