pub mod convert;
pub mod distance;
pub mod fetch;
pub mod flatten;
pub mod info;
