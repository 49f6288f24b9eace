// Application layer modules
pub mod crud_handler;
pub mod response_builder;

// Re-exports
pub use crud_handler::CrudHandler;
pub use response_builder::ResponseBuilder;
