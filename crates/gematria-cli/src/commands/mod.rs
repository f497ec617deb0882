pub mod bulk;
pub mod compute;
pub mod import;
pub mod normalize;
pub mod store_args;
