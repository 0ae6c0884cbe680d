//! Authentication
//!
//! Only snapshot writes are protected; everything else is public.

pub mod operator;

pub use operator::operator_middleware;
