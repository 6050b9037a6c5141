//! Checkout Pages

use std::sync::Arc;

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use textjoy_checkout::catalog::{self, CollectionId, TIMEZONES};
use textjoy_checkout::dates;
use textjoy_checkout::{
    Checkout, CheckoutConfig, CheckoutError, CheckoutOptions, Field, FieldUpdate, FormValues,
    PackageId, PaymentToken, PurchaseSubmitter, SubmissionStatus, TokenRequester,
};

use crate::api;
use crate::browser::{FacebookPixel, StripeCheckoutWidget, detect_timezone};
use crate::components::{MessagePreview, TextField};

#[component]
pub fn SubscriptionPage() -> impl IntoView {
    view! { <CheckoutForm options=CheckoutOptions::subscription() /> }
}

#[component]
pub fn GiftPage() -> impl IntoView {
    view! { <CheckoutForm options=CheckoutOptions::gift() /> }
}

fn recipient_first_name(values: &FormValues) -> String {
    values.recipient_first_name.clone()
}

fn recipient_phone_number(values: &FormValues) -> String {
    values.recipient_phone_number.clone()
}

fn customer_name(values: &FormValues) -> String {
    values.customer_name.clone()
}

fn customer_email(values: &FormValues) -> String {
    values.customer_email.clone()
}

/// Token arrived: lock the form and post the order
fn submit_purchase(checkout: RwSignal<Checkout>, config: &CheckoutConfig, token: PaymentToken) {
    let order = match checkout.try_update(Checkout::place_order) {
        Some(Ok(order)) => order,
        Some(Err(e)) => {
            tracing::error!(error = %e, "Could not place order");
            return;
        }
        None => return,
    };

    let mut submitter = PurchaseSubmitter::new(config);
    if let Some(pixel) = FacebookPixel::detect() {
        submitter = submitter.with_analytics(Arc::new(pixel));
    }

    spawn_local(async move {
        let status = submitter.submit(&order, token).await;
        if let Some(Err(e)) = checkout.try_update(|c| c.complete(&status)) {
            tracing::error!(error = %e, "Could not record purchase outcome");
        }
    });
}

#[component]
fn CheckoutForm(options: CheckoutOptions) -> impl IntoView {
    let copy = options.copy.clone();
    let collect_email = options.collect_email;
    let finish_label = StoredValue::new(copy.finish_label.clone());
    let checkout = RwSignal::new(Checkout::new(options, detect_timezone()));
    let config = RwSignal::new(None::<CheckoutConfig>);
    let unavailable = RwSignal::new(None::<String>);

    spawn_local(async move {
        match api::fetch_config().await {
            Ok(loaded) => config.set(Some(loaded)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    retryable = e.is_retryable(),
                    "Checkout configuration unavailable"
                );
                unavailable.set(Some(e.user_message().to_string()));
            }
        }
    });

    let buy = move |_: ev::MouseEvent| {
        let Some(config) = config.get() else {
            tracing::warn!("Buy pressed before configuration loaded");
            return;
        };

        match checkout.try_update(|c| c.prepare_payment(&config.publishable_key)) {
            Some(Ok(request)) => {
                let on_token = Box::new(move |token| submit_purchase(checkout, &config, token));
                StripeCheckoutWidget.request_token(request, on_token);
            }
            Some(Err(CheckoutError::Invalid(_))) | None => {}
            Some(Err(e)) => tracing::warn!(error = %e, "Payment not started"),
        }
    };

    let finish = move |_: ev::MouseEvent| {
        if let Some(Err(e)) = checkout.try_update(Checkout::finish) {
            tracing::warn!(error = %e, "Finish ignored");
        }
    };

    let status = move || checkout.with(Checkout::status);
    let overlay = move || checkout.with(|c| c.overlay().map(str::to_string));
    let failure = move || checkout.with(|c| c.failure().map(str::to_string));
    let error_message = move || checkout.with(|c| c.error().map(|e| e.message.clone()));

    let collection_change = move |ev: ev::Event| {
        let id = CollectionId::new(event_target_value(&ev));
        if let Some(Err(e)) = checkout.try_update(|c| c.select_collection(id)) {
            tracing::warn!(error = %e, "Collection not selected");
        }
    };

    let timezone_change = move |ev: ev::Event| {
        let selection = catalog::find_timezone(&event_target_value(&ev)).map(|tz| tz.selection());
        checkout.update(|c| c.set(FieldUpdate::RecipientTimezone(selection)));
    };

    let package_change = move |ev: ev::Event| {
        let id = PackageId::new(event_target_value(&ev));
        checkout.update(|c| {
            let selection = c.options().packages.get(&id).map(|p| p.selection());
            match selection {
                Ok(selection) => c.set(FieldUpdate::Package(selection)),
                Err(e) => tracing::warn!(error = %e, "Package not selected"),
            }
        });
    };

    // Past days are not offered; anything unparseable keeps the last good date.
    let start_date_change = move |ev: ev::Event| {
        let Some(date) = dates::parse_date(&event_target_value(&ev)) else {
            return;
        };
        if dates::is_selectable(date, dates::today()) {
            checkout.update(|c| c.set(FieldUpdate::StartDate(date)));
        }
    };

    view! {
        <div class="checkout">
            <header>
                <h1>{copy.heading.clone()}</h1>
            </header>

            <section class="collections">
                <select
                    id="collection"
                    on:change=collection_change
                    disabled=move || status() == SubmissionStatus::Loading
                >
                    {catalog::COLLECTIONS
                        .iter()
                        .map(|collection| {
                            let id = collection.id;
                            view! {
                                <option
                                    value=id
                                    prop:selected=move || {
                                        checkout.with(|c| c.collection_id().as_str() == id)
                                    }
                                >
                                    {collection.name}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <p class="intro">
                    {move || checkout.with(|c| c.collection().map(|col| col.intro).unwrap_or_default())}
                </p>
                <MessagePreview checkout=checkout />
            </section>

            <section class="form">
                <h2>{copy.form_title.clone()}</h2>

                <TextField
                    checkout=checkout
                    field=Field::RecipientFirstName
                    label="Their first name"
                    read=recipient_first_name
                    write=FieldUpdate::RecipientFirstName
                    placeholder="Chloe"
                />
                <TextField
                    checkout=checkout
                    field=Field::RecipientPhoneNumber
                    label="Their mobile number"
                    read=recipient_phone_number
                    write=FieldUpdate::RecipientPhoneNumber
                    input_type="tel"
                    placeholder="+447400123456"
                />

                <div class=move || {
                    if checkout.with(|c| c.has_error(Field::RecipientTimezone)) {
                        "field has-error"
                    } else {
                        "field"
                    }
                }>
                    <label for=Field::RecipientTimezone.id()>"Their timezone"</label>
                    <select id=Field::RecipientTimezone.id() on:change=timezone_change>
                        <option
                            value=""
                            prop:selected=move || {
                                checkout.with(|c| c.values().recipient_timezone.is_none())
                            }
                        >
                            "Select a timezone"
                        </option>
                        {TIMEZONES
                            .iter()
                            .map(|tz| {
                                let name = tz.name;
                                view! {
                                    <option
                                        value=name
                                        prop:selected=move || {
                                            checkout.with(|c| {
                                                c.values()
                                                    .recipient_timezone
                                                    .as_ref()
                                                    .is_some_and(|s| s.name == name)
                                            })
                                        }
                                    >
                                        {tz.selection().label}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="field">
                    <label for=Field::StartDate.id()>"First message on"</label>
                    <input
                        id=Field::StartDate.id()
                        type="text"
                        prop:value=move || checkout.with(|c| dates::format_date(c.values().start_date))
                        on:change=start_date_change
                    />
                </div>

                <TextField
                    checkout=checkout
                    field=Field::CustomerName
                    label="Your name"
                    read=customer_name
                    write=FieldUpdate::CustomerName
                />

                <Show when=move || collect_email>
                    <TextField
                        checkout=checkout
                        field=Field::CustomerEmail
                        label="Your email"
                        read=customer_email
                        write=FieldUpdate::CustomerEmail
                        input_type="email"
                    />
                </Show>

                <div class="field">
                    <label for=Field::Package.id()>"Package"</label>
                    <select id=Field::Package.id() on:change=package_change>
                        {checkout
                            .with_untracked(|c| c.options().packages.packages().to_vec())
                            .into_iter()
                            .map(|package| {
                                let id = package.id;
                                view! {
                                    <option
                                        value=id
                                        prop:selected=move || {
                                            checkout.with(|c| c.values().package.id.as_str() == id)
                                        }
                                    >
                                        {package.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <Show when=move || error_message().is_some()>
                    <p class="error">{move || error_message().unwrap_or_default()}</p>
                </Show>
                <Show when=move || failure().is_some()>
                    <p class="error">{move || failure().unwrap_or_default()}</p>
                </Show>
                <Show when=move || unavailable.with(Option::is_some)>
                    <p class="error">{move || unavailable.get().unwrap_or_default()}</p>
                </Show>

                <button
                    class="btn btn-primary"
                    on:click=buy
                    disabled=move || {
                        config.with(Option::is_none) || status() == SubmissionStatus::Loading
                    }
                >
                    {copy.buy_label.clone()}
                </button>
            </section>

            <Show when=move || overlay().is_some()>
                <div class=move || format!("overlay overlay-{}", status())>
                    <p>{move || overlay().unwrap_or_default()}</p>
                    <Show when=move || status() == SubmissionStatus::Succeeded>
                        <button class="btn" on:click=finish>
                            {finish_label.get_value()}
                        </button>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
