pub mod context;
pub mod ordering;
pub mod search;
pub mod tt;
