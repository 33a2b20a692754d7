pub mod builder;
pub mod constructor;
pub mod templates;
