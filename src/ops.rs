pub mod catch_error;
pub mod delay;
pub mod exhaust_all;
pub mod filter;
pub mod group_by;
pub mod map;
pub mod map_err;
pub mod merge_all;
pub mod reduce;
pub mod retry;
pub mod scan;
pub mod switch_all;
pub mod take;
pub mod tap;
pub mod try_map;
