//! 演出用ログコンソール

use leptos::prelude::*;

#[component]
pub fn LogConsole(lines: Signal<Vec<String>>, visible: Signal<bool>) -> impl IntoView {
    let console_ref = NodeRef::<leptos::html::Div>::new();

    // 追記のたびに末尾までスクロール
    Effect::new(move |_| {
        lines.track();
        if let Some(el) = console_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <div
            id="hollywood-console"
            node_ref=console_ref
            class=move || {
                if visible.get() {
                    "hollywood-console hollywood-console-visible"
                } else {
                    "hollywood-console hollywood-console-hidden"
                }
            }
        >
            <pre id="console-output">
                {move || lines.with(|l| l.iter().map(|line| format!("{}\n", line)).collect::<String>())}
            </pre>
        </div>
    }
}
