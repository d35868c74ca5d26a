pub mod access;
pub mod compress;
pub mod expression;
pub mod sql;
