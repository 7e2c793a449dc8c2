use starlight_engine::{Action, ActionSender, HintAdvisor, HintError, HintRequest, HintResponse};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

/// Hint advisor that POSTs each request as JSON to a remote endpoint.
///
/// The fetch runs detached on the browser's event loop. A successful answer
/// is sent back as `SetHint`; anything else is logged and dropped, leaving
/// the local fallback phrase on screen. Without an endpoint it stays silent.
#[derive(Debug, Clone, Default)]
pub struct FetchHintAdvisor {
    endpoint: Option<String>,
}

impl FetchHintAdvisor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: Some(endpoint.into()) }
    }

    pub fn from_endpoint(endpoint: Option<String>) -> Self {
        Self { endpoint }
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }
}

impl HintAdvisor for FetchHintAdvisor {
    fn request(&self, request: HintRequest, reply: ActionSender) {
        let Some(endpoint) = self.endpoint.clone() else {
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_hint(&endpoint, &request).await {
                Ok(hint) => {
                    if !reply.send(Action::SetHint(hint)) {
                        log::debug!("Hint arrived after teardown, dropped");
                    }
                }
                Err(e) => log::warn!("Hint request failed: {e}"),
            }
        });
    }
}

fn js_error(e: JsValue) -> HintError {
    HintError::Transport(format!("{e:?}"))
}

async fn fetch_hint(endpoint: &str, request: &HintRequest) -> Result<String, HintError> {
    let body = serde_json::to_string(request)?;

    let headers = Headers::new().map_err(js_error)?;
    headers.set("Content-Type", "application/json").map_err(js_error)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_headers(&headers);
    opts.set_body(&JsValue::from_str(&body));

    let req = Request::new_with_str_and_init(endpoint, &opts).map_err(js_error)?;
    let window = web_sys::window().ok_or_else(|| HintError::Transport("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&req)).await.map_err(js_error)?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| HintError::Transport("response is not a Response".into()))?;

    if !resp.ok() {
        return Err(HintError::Status(resp.status()));
    }

    let text = JsFuture::from(resp.text().map_err(js_error)?).await.map_err(js_error)?;
    let text = text.as_string().ok_or(HintError::Empty)?;
    Ok(HintResponse::from_json(&text)?.hint)
}
