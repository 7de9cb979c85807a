// Public library interface for spendwise-back-end
pub mod api;
pub mod expenses;
pub mod schema;
pub mod utils;
