use leptos::prelude::*;
use leptos_tiptap::*;

/// Rich-text editor for the post body.
///
/// Wraps a tiptap instance with a small formatting toolbar and writes the
/// produced HTML into `value`, which the surrounding form carries in a
/// hidden `content` field.
#[component]
pub fn PostEditor(value: RwSignal<String>) -> impl IntoView {
    let (msg, set_msg) = signal(TiptapInstanceMsg::Noop);
    let (disabled, _set_disabled) = signal(false);
    let (_selection, set_selection) = signal(TiptapSelectionState::default());

    view! {
        <div class="space-y-2">
            // Toolbar
            <div class="flex flex-wrap gap-1 p-2 bg-base-200 rounded-lg">
                <button type="button" class="btn btn-sm btn-ghost" title="Bold"
                    on:click=move |_| set_msg.set(TiptapInstanceMsg::Bold)>
                    <strong>"B"</strong>
                </button>
                <button type="button" class="btn btn-sm btn-ghost" title="Italic"
                    on:click=move |_| set_msg.set(TiptapInstanceMsg::Italic)>
                    <em>"I"</em>
                </button>
                <button type="button" class="btn btn-sm btn-ghost" title="Strikethrough"
                    on:click=move |_| set_msg.set(TiptapInstanceMsg::Strike)>
                    <s>"S"</s>
                </button>
                <div class="divider divider-horizontal mx-0"></div>
                <button type="button" class="btn btn-sm btn-ghost" title="Heading 2"
                    on:click=move |_| set_msg.set(TiptapInstanceMsg::H2)>
                    "H2"
                </button>
                <button type="button" class="btn btn-sm btn-ghost" title="Heading 3"
                    on:click=move |_| set_msg.set(TiptapInstanceMsg::H3)>
                    "H3"
                </button>
                <div class="divider divider-horizontal mx-0"></div>
                <button type="button" class="btn btn-sm btn-ghost" title="Bullet List"
                    on:click=move |_| set_msg.set(TiptapInstanceMsg::BulletList)>
                    "List"
                </button>
                <button type="button" class="btn btn-sm btn-ghost" title="Ordered List"
                    on:click=move |_| set_msg.set(TiptapInstanceMsg::OrderedList)>
                    "1. List"
                </button>
                <button type="button" class="btn btn-sm btn-ghost" title="Blockquote"
                    on:click=move |_| set_msg.set(TiptapInstanceMsg::Blockquote)>
                    "Quote"
                </button>
            </div>

            // Editor surface
            <div class="border border-base-300 rounded-lg min-h-[300px] p-4 bg-base-100 prose max-w-none">
                <TiptapInstance
                    id=Signal::derive(|| "post-editor".to_string())
                    msg=msg
                    disabled=disabled
                    value=value
                    set_value=Callback::new(move |(v,): (TiptapContent,)| {
                        value.set(match v {
                            TiptapContent::Html(content) => content,
                            TiptapContent::Json(content) => content,
                        });
                    })
                    on_selection_change=Callback::new(move |(state,): (TiptapSelectionState,)| {
                        set_selection.set(state);
                    })
                />
            </div>
        </div>
    }
}
