pub mod helper;
pub mod keys;
pub mod scan;
