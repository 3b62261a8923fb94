pub mod receive;
pub mod send;
