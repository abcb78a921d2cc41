pub mod form;
mod output;
mod view;

pub use view::Predict;
