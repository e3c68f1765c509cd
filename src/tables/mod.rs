//! Value, action-value and policy tables produced by the solvers.

pub mod policy;
pub mod q_table;
pub mod role_tables;
pub mod value_table;

pub use policy::Policy;
pub use q_table::QTable;
pub use role_tables::RoleTables;
pub use value_table::ValueTable;
