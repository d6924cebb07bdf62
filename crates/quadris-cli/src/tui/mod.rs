//! Minimal TUI runtime: a tick/render event loop driving an [`App`].

pub(crate) use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
