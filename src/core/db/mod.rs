/// Database Module
///
/// ## Architecture
///
/// The database layer is split into three concerns:
/// - **Connection Management** (`connection.rs`): owns the single SQLite connection and its lifecycle
/// - **Query Execution** (`query.rs`): result sets and value formatting
/// - **Schema** (`schema.rs`): table DDL, initialization and introspection
///
/// ## Error Handling
///
/// All database operations use the `StudentDbError` type for consistent error propagation.
pub mod connection;
pub mod query;
pub mod schema;

pub use connection::*;
pub use query::*;
pub use schema::*;
