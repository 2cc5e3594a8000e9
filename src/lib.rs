//! Causerie is a terminal chat client for a local AI inference endpoint.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state: the transcript store, the draft input, and
//!   the turn submission state machine.
//! - [`api`] defines the request payload, the endpoint client, and the
//!   reply-resolution policy for whatever JSON the bridge returns.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`logging`] appends settled exchanges to an optional transcript file.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`), which
//! resolves configuration and hands off to [`ui::chat_loop`].

pub mod api;
pub mod core;
pub mod logging;
pub mod ui;
