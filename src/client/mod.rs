// API client module

mod dispatcher;
pub mod request;

pub use dispatcher::RequestDispatcher;
pub use request::{resolve_url, Method, RequestDescriptor};
