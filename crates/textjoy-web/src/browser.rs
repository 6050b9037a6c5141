//! Browser Integrations
//!
//! Stripe Checkout, the Facebook pixel and timezone detection. Everything here
//! talks to globals the page may or may not have loaded.

use textjoy_checkout::{
    AnalyticsHook, PaymentToken, PurchaseEvent, TokenCallback, TokenRequest, TokenRequester,
};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::js_sys::{Array, Function, Intl, JSON, Object, Reflect};

#[wasm_bindgen]
extern "C" {
    /// Handler returned by `StripeCheckout.configure`
    type StripeHandler;

    #[wasm_bindgen(catch, js_namespace = StripeCheckout, js_name = configure)]
    fn configure_stripe(options: &Object) -> Result<StripeHandler, JsValue>;

    #[wasm_bindgen(method)]
    fn open(this: &StripeHandler, options: &Object);
}

fn set(target: &Object, key: &str, value: impl Into<JsValue>) {
    let _ = Reflect::set(target, &JsValue::from_str(key), &value.into());
}

fn token_from_js(token: &JsValue) -> Option<PaymentToken> {
    let json = String::from(JSON::stringify(token).ok()?);
    serde_json::from_str(&json).ok().map(PaymentToken::new)
}

/// Legacy Stripe Checkout modal (`checkout.js`)
pub struct StripeCheckoutWidget;

impl TokenRequester for StripeCheckoutWidget {
    fn request_token(&self, request: TokenRequest, on_token: TokenCallback) {
        let config = Object::new();
        set(&config, "key", request.publishable_key.as_str());
        set(&config, "image", request.image.as_str());
        set(&config, "locale", request.locale.as_str());

        let token_handler = Closure::once_into_js(move |token: JsValue| {
            match token_from_js(&token) {
                Some(token) => on_token(token),
                None => tracing::error!("Stripe returned an unreadable token"),
            }
        });
        set(&config, "token", token_handler);

        let handler = match configure_stripe(&config) {
            Ok(handler) => handler,
            Err(e) => {
                tracing::error!(error = ?e, "Stripe Checkout script not loaded");
                return;
            }
        };

        let options = Object::new();
        set(&options, "name", request.name.as_str());
        set(&options, "description", request.description.as_str());
        set(&options, "amount", request.amount);
        set(&options, "currency", request.currency.code());
        if let Some(email) = &request.email {
            set(&options, "email", email.as_str());
        }
        if let Some(label) = &request.panel_label {
            set(&options, "panelLabel", label.as_str());
        }

        tracing::info!(amount = request.amount, "Opening payment widget");
        handler.open(&options);
    }
}

fn fbq() -> Option<Function> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str("fbq"))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Facebook pixel purchase tracking
pub struct FacebookPixel;

impl FacebookPixel {
    /// Present only when the page loaded the pixel
    pub fn detect() -> Option<Self> {
        fbq().map(|_| Self)
    }
}

impl AnalyticsHook for FacebookPixel {
    fn track_purchase(&self, event: &PurchaseEvent) {
        let Some(fbq) = fbq() else {
            return;
        };

        let params = Object::new();
        set(&params, "value", event.value);
        set(&params, "currency", event.currency.code());

        if let Err(e) = fbq.call3(
            &JsValue::NULL,
            &JsValue::from_str("track"),
            &JsValue::from_str("Purchase"),
            &params,
        ) {
            tracing::warn!(error = ?e, "Pixel purchase tracking failed");
        }
    }
}

/// IANA timezone the browser reports, e.g. `Europe/London`
pub fn detect_timezone() -> Option<String> {
    let format = Intl::DateTimeFormat::new(&Array::new(), &Object::new());
    Reflect::get(&format.resolved_options(), &JsValue::from_str("timeZone"))
        .ok()?
        .as_string()
}
