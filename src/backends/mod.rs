//! Event source backends for `racehud`.
//!
//! Implementations of [`EventSource`](crate::device::EventSource). Platform event
//! layers live in the host game; this crate only ships a scripted source used by
//! demos and tests.

pub mod virtual_input;
