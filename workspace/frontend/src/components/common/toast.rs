use std::rc::Rc;

use yew::prelude::*;

use crate::settings;

/// Severity of one notice; maps onto the daisyUI alert palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn alert_class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "alert-info",
            NoticeLevel::Success => "alert-success",
            NoticeLevel::Warning => "alert-warning",
            NoticeLevel::Error => "alert-error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            NoticeLevel::Info => "fas fa-info-circle",
            NoticeLevel::Success => "fas fa-check-circle",
            NoticeLevel::Warning => "fas fa-exclamation-triangle",
            NoticeLevel::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Notice {
    id: usize,
    level: NoticeLevel,
    text: String,
}

/// Notices currently on screen, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
struct NoticeQueue {
    notices: Vec<Notice>,
}

enum QueueAction {
    Push(Notice),
    Dismiss { id: usize },
}

impl Reducible for NoticeQueue {
    type Action = QueueAction;

    fn reduce(self: Rc<Self>, action: QueueAction) -> Rc<Self> {
        let mut queue = Rc::unwrap_or_clone(self);
        match action {
            QueueAction::Push(notice) => queue.notices.push(notice),
            QueueAction::Dismiss { id } => queue.notices.retain(|notice| notice.id != id),
        }
        Rc::new(queue)
    }
}

/// Handle pages use to surface transient notices. Obtained via
/// [`use_toast`]; the provider owns the queue and the auto-expiry timers.
#[derive(Clone, PartialEq)]
pub struct ToastHandle {
    post: Callback<(NoticeLevel, String)>,
}

impl ToastHandle {
    pub fn info(&self, text: impl Into<String>) {
        self.post.emit((NoticeLevel::Info, text.into()));
    }

    pub fn success(&self, text: impl Into<String>) {
        self.post.emit((NoticeLevel::Success, text.into()));
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.post.emit((NoticeLevel::Warning, text.into()));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.post.emit((NoticeLevel::Error, text.into()));
    }
}

/// Read the toast handle. Panics outside [`ToastProvider`], which is a
/// wiring bug.
#[hook]
pub fn use_toast() -> ToastHandle {
    use_context::<ToastHandle>().expect("ToastProvider is missing from the component tree")
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let queue = use_reducer(NoticeQueue::default);
    // Ids come from a ref, not state, so two notices posted within one
    // render cannot collide.
    let counter = use_mut_ref(|| 0usize);

    let dismiss = {
        let queue = queue.clone();
        Callback::from(move |id: usize| queue.dispatch(QueueAction::Dismiss { id }))
    };

    let post = {
        let queue = queue.clone();
        let dismiss = dismiss.clone();
        let counter = counter.clone();

        Callback::from(move |(level, text): (NoticeLevel, String)| {
            let id = {
                let mut counter = counter.borrow_mut();
                let id = *counter;
                *counter += 1;
                id
            };
            queue.dispatch(QueueAction::Push(Notice { id, level, text }));

            let dismiss = dismiss.clone();
            let lifetime_ms = settings::get_settings().toast_duration_ms;
            gloo_timers::callback::Timeout::new(lifetime_ms, move || dismiss.emit(id)).forget();
        })
    };

    let handle = ToastHandle { post };

    html! {
        <ContextProvider<ToastHandle> context={handle}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for queue.notices.iter().map(|notice| {
                    let on_close = {
                        let dismiss = dismiss.clone();
                        let id = notice.id;
                        Callback::from(move |_| dismiss.emit(id))
                    };

                    html! {
                        <div key={notice.id} class={classes!("alert", notice.level.alert_class(), "shadow-lg")}>
                            <i class={notice.level.icon()}></i>
                            <span>{&notice.text}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastHandle>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: usize, text: &str) -> Notice {
        Notice {
            id,
            level: NoticeLevel::Info,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_push_appends_in_arrival_order() {
        let queue = Rc::new(NoticeQueue::default());
        let queue = queue.reduce(QueueAction::Push(notice(0, "first")));
        let queue = queue.reduce(QueueAction::Push(notice(1, "second")));

        let texts: Vec<&str> = queue.notices.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_dismiss_removes_only_the_addressed_notice() {
        let queue = Rc::new(NoticeQueue::default());
        let queue = queue.reduce(QueueAction::Push(notice(0, "stays")));
        let queue = queue.reduce(QueueAction::Push(notice(1, "goes")));
        let queue = queue.reduce(QueueAction::Dismiss { id: 1 });

        assert_eq!(queue.notices.len(), 1);
        assert_eq!(queue.notices[0].id, 0);
    }

    #[test]
    fn test_dismissing_an_expired_notice_is_harmless() {
        let queue = Rc::new(NoticeQueue::default());
        let queue = queue.reduce(QueueAction::Push(notice(0, "only")));
        let queue = queue.reduce(QueueAction::Dismiss { id: 0 });
        let queue = queue.reduce(QueueAction::Dismiss { id: 0 });

        assert!(queue.notices.is_empty());
    }
}
