use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DialogProps {
    pub title: AttrValue,
    pub children: Html,
    /// Called when the backdrop is clicked, if `dismissable`.
    pub on_dismiss: Callback<()>,
    #[prop_or(true)]
    pub dismissable: bool,
    #[prop_or_else(|| AttrValue::from("max-w-md"))]
    pub max_width: AttrValue,
}

/// Centered panel over a dimmed backdrop.
#[function_component]
pub fn Dialog(props: &DialogProps) -> Html {
    let backdrop_ref = use_node_ref();

    let on_backdrop_click = {
        let on_dismiss = props.on_dismiss.clone();
        let backdrop_ref = backdrop_ref.clone();
        let dismissable = props.dismissable;

        Callback::from(move |e: MouseEvent| {
            // clicks inside the panel bubble up here too
            if dismissable
                && let Some(backdrop) = backdrop_ref.cast::<web_sys::Element>()
                && let Some(target) = e.target()
                && target.dyn_ref::<web_sys::Element>() == Some(&backdrop)
            {
                on_dismiss.emit(());
            }
        })
    };

    html! {
        <div
            ref={backdrop_ref}
            onclick={on_backdrop_click}
            class="fixed inset-0 bg-black bg-opacity-50 z-50 flex
                   items-center justify-center p-4"
        >
            <div class={classes!(
                "bg-white", "dark:bg-neutral-800", "rounded-lg", "shadow-xl",
                "w-full", "p-6", props.max_width.to_string()
            )}>
                <h2 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100 mb-4">
                    {&props.title}
                </h2>
                {props.children.clone()}
            </div>
        </div>
    }
}
