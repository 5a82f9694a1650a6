pub mod dispatch;
pub mod extract;
pub mod staging;
