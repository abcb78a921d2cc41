pub mod error;
pub mod loading;
pub mod toast;

pub use error::ErrorDisplay;
pub use loading::{Loading, LoadingSpinner};
pub use toast::{ToastProvider, use_toast};
