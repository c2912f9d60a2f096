pub mod args;
pub mod model;
pub mod pair;
