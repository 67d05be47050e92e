use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_else(|| AttrValue::from("Submit"))]
    pub text: AttrValue,
    #[prop_or_else(|| AttrValue::from("w-24"))]
    pub width: AttrValue,
}

/// Form submit button that disables itself and shows a spinner while the
/// submission is in flight.
#[function_component]
pub fn SubmitButton(props: &SubmitButtonProps) -> Html {
    html! {
        <button
            type="submit"
            disabled={props.loading}
            class={classes!(
                "flex", "justify-center", "px-4", "py-2", "text-sm", "font-medium",
                "text-white", "bg-neutral-900", "hover:bg-neutral-700",
                "dark:bg-neutral-100", "dark:text-neutral-900",
                "rounded-md", "disabled:opacity-50", "disabled:cursor-not-allowed",
                "transition-colors", props.width.to_string()
            )}
        >
            if props.loading {
                <span class="inline-block animate-spin rounded-full h-4 w-4 border-2
                             border-white dark:border-neutral-900 border-t-transparent"></span>
            } else {
                {&props.text}
            }
        </button>
    }
}
