pub mod callback;
pub mod factory;
