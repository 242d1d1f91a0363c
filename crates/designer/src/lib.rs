// Library crate: the editor core (state, persistence client, command protocol).
// Rendering is done elsewhere; it only reads from `state`.

pub mod client;
pub mod command;
pub mod fixtures;
pub mod session;
pub mod state;
