/// Lifecycle of one fetch driven by a component. The error arm stores
/// display-ready text (`ApiError` renders through `Display` on the way in).
#[derive(Clone, PartialEq)]
pub enum FetchState<T> {
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

// Yew hooks cannot be called conditionally, so components drive this
// state inline: hold it in `use_state`, flip to `Loading` before the
// `spawn_local`, and set `Success`/`Error` when the future resolves.
