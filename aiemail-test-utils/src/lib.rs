pub mod constant;
pub mod fixtures;

pub mod prelude {
    pub use crate::{
        constant::*,
        fixtures::{callback, factory},
    };
}
