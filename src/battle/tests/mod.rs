pub mod common;

mod test_ai;
mod test_damage;
mod test_fainting;
