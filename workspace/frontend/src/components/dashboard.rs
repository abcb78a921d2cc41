mod activity;
mod stats;
mod view;

pub use view::Dashboard;
