//! UI Components

use leptos::prelude::*;
use textjoy_checkout::{Checkout, Field, FieldUpdate, FormValues};

/// Demo messages for the selected collection, addressed to the recipient
#[component]
pub fn MessagePreview(checkout: RwSignal<Checkout>) -> impl IntoView {
    let preview = move || {
        checkout.with(|c| {
            c.collection()
                .map(|collection| collection.preview(&c.values().recipient_first_name))
                .ok()
        })
    };

    view! {
        <div class="preview">
            {move || {
                preview()
                    .map(|[first, second]| {
                        view! {
                            <p class="message">{first}</p>
                            <p class="message">{second}</p>
                        }
                    })
            }}
        </div>
    }
}

/// Labelled text input bound to one form field
#[component]
pub fn TextField(
    checkout: RwSignal<Checkout>,
    field: Field,
    label: &'static str,
    read: fn(&FormValues) -> String,
    write: fn(String) -> FieldUpdate,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "")] placeholder: &'static str,
) -> impl IntoView {
    let class = move || {
        if checkout.with(|c| c.has_error(field)) {
            "field has-error"
        } else {
            "field"
        }
    };

    view! {
        <div class=class>
            <label for=field.id()>{label}</label>
            <input
                id=field.id()
                type=input_type
                placeholder=placeholder
                prop:value=move || checkout.with(|c| read(c.values()))
                on:input=move |ev| checkout.update(|c| c.set(write(event_target_value(&ev))))
            />
        </div>
    }
}
