pub type Result<T> = ::std::result::Result<T, ::failure::Error>;

pub use crate::video::errors::Error as VideoError;
