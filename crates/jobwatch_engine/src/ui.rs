//! Capabilities the runtime needs from whatever hosts the dashboard.
//!
//! User input flows the other way: hosts report selector changes, page clicks
//! and notice clicks as `Msg`s through a [`crate::DashboardHandle`].

use jobwatch_core::{Control, Filter, PagerConfig, View};

pub trait Renderer {
    fn render(&mut self, view: &View);
}

pub trait FilterControls {
    /// Replaces the options of one selector.
    fn set_options(&mut self, control: Control, options: &[String]);
    /// Moves both selectors to `filter`. Must not report a change back.
    fn set(&mut self, filter: &Filter);
}

pub trait Pager {
    /// Shows page links. Clicks are reported with `config.generation`.
    fn configure(&mut self, config: &PagerConfig);
    /// Removes the pager and forgets its click handler.
    fn destroy(&mut self);
}

/// The address-bar hash.
pub trait Location {
    fn hash(&self) -> String;
    /// Stores the hash. The runtime itself announces the change, so
    /// implementations must not echo it as a `Msg::HashChanged`.
    fn set_hash(&mut self, hash: &str);
}

pub trait DashboardUi: Renderer + FilterControls + Pager + Location {}

impl<T: Renderer + FilterControls + Pager + Location> DashboardUi for T {}
