pub mod sqlite;

pub use sqlite::{begin, create_pool, run_migrations, UnitOfWork};
