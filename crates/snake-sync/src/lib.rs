//! `snake-sync` — cooperative coordination primitives.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`lockstep`]  | `Lockstep<E>` fan-out, `LockstepConsumer<E>` handles      |
//! | [`wait_map`]  | `WaitMap<T>` position-keyed wait/notify, `Waiter<T>`      |
//!
//! # Concurrency model
//!
//! Everything here is built for one cooperative task: state lives behind
//! `Rc<RefCell<_>>` or plain `&mut` access, wake-ups go through
//! `tokio::sync::oneshot`, and no borrow is ever held across an `.await`.
//! The types are deliberately `!Send`.  Code that moves them onto a
//! multi-threaded runtime must wrap them in real locks.

pub mod lockstep;
pub mod wait_map;


pub use lockstep::{Lockstep, LockstepConsumer};
pub use wait_map::{WaitMap, Waiter};
