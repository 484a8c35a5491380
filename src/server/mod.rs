// Server module entry point
// Listener creation, connection handling, accept loop, and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

mod accept_loop;

// Re-export commonly used items
pub use accept_loop::run_accept_loop;
pub use listener::create_listener;
