pub mod prelude;

pub mod members;
