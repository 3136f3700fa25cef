use gloo_timers::callback::Timeout;
use yew::prelude::*;

const NOTICE_TIMEOUT_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Short-lived message shown at the top of the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
    pub notice: Option<Notice>,
    pub on_dismiss: Callback<()>,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.notice.clone(), move |notice| {
            let timeout = notice
                .as_ref()
                .map(|_| Timeout::new(NOTICE_TIMEOUT_MS, move || on_dismiss.emit(())));
            // Dropping the Timeout cancels it
            move || drop(timeout)
        });
    }

    let Some(notice) = &props.notice else {
        return html! {};
    };
    let class = match notice.level {
        NoticeLevel::Success => "notice notice-success",
        NoticeLevel::Error => "notice notice-error",
    };

    html! {
        <div class={class} role="status" onclick={props.on_dismiss.reform(|_| ())}>
            {notice.text.clone()}
        </div>
    }
}
