//! Drives `CdpPage` against an in-process fake DevTools endpoint.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use turnmark_page_cdp::{CdpClient, CdpError, CdpPage};
use turnmark_protocols::{ElementHandle, ElementQuery, PageContext, PageError, ScrollOptions};

type Handler = Arc<dyn Fn(&str, &Value) -> Result<Value, (i64, String)> + Send + Sync>;

/// Methods received by the fake browser, with their params.
type Log = Arc<Mutex<Vec<(String, Value)>>>;

async fn fake_browser(handler: Handler) -> (String, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: Log = Arc::default();

    let seen = log.clone();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        while let Some(Ok(msg)) = ws.next().await {
            let Message::Text(text) = msg else { continue };
            let request: Value = serde_json::from_str(&text).unwrap();
            let method = request["method"].as_str().unwrap_or_default().to_string();
            let params = request["params"].clone();
            seen.lock().push((method.clone(), params.clone()));

            let reply = match handler(&method, &params) {
                Ok(result) => json!({"id": request["id"], "result": result}),
                Err((code, message)) => {
                    json!({"id": request["id"], "error": {"code": code, "message": message}})
                }
            };
            ws.send(Message::Text(reply.to_string().into())).await.unwrap();
        }
    });

    (format!("ws://{addr}"), log)
}

fn value(v: Value) -> Value {
    json!({"result": {"type": "object", "value": v}})
}

/// Answers target/domain plumbing and hands evaluations to `eval`.
fn browser(eval: impl Fn(&str) -> Result<Value, (i64, String)> + Send + Sync + 'static) -> Handler {
    Arc::new(move |method, params| match method {
        "Target.attachToTarget" => Ok(json!({"sessionId": "S1"})),
        "Runtime.evaluate" => eval(params["expression"].as_str().unwrap_or_default()),
        _ => Ok(json!({})),
    })
}

async fn open(handler: Handler) -> (CdpClient, CdpPage, Log) {
    let (ws_url, log) = fake_browser(handler).await;
    let client = CdpClient::connect_websocket("http://127.0.0.1:9", &ws_url)
        .await
        .unwrap();
    let session = client.attach_page("T1").await.unwrap();
    (client, CdpPage::new(session), log)
}

fn evaluated(log: &Log) -> Vec<String> {
    log.lock()
        .iter()
        .filter(|(method, _)| method == "Runtime.evaluate")
        .map(|(_, params)| params["expression"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_attach_enables_domains() {
    let (_client, page, log) = open(browser(|_| Ok(value(Value::Null)))).await;

    assert_eq!(page.session().session_id(), "S1");
    assert_eq!(page.session().target_id(), "T1");
    let methods: Vec<_> = log.lock().iter().map(|(m, _)| m.clone()).collect();
    assert_eq!(
        methods,
        vec!["Target.attachToTarget", "Page.enable", "Runtime.enable"]
    );
}

#[tokio::test]
async fn test_location_snapshot() {
    let (_client, page, _log) = open(browser(|_| {
        Ok(value(json!({
            "href": "https://gemini.google.com/app/abc",
            "origin": "https://gemini.google.com",
            "host": "gemini.google.com",
            "pathname": "/app/abc",
            "search": ""
        })))
    }))
    .await;

    let location = page.location().await.unwrap();
    assert_eq!(location.origin, "https://gemini.google.com");
    assert_eq!(location.pathname, "/app/abc");
}

#[tokio::test]
async fn test_find_reports_presence() {
    let (_client, page, log) = open(browser(|expr| {
        Ok(value(Value::Bool(expr.contains("present"))))
    }))
    .await;

    let hit = page.find(&ElementQuery::Id("present".into())).await.unwrap();
    let miss = page.find(&ElementQuery::Id("absent".into())).await.unwrap();

    assert_eq!(hit, Some(ElementHandle::new(ElementQuery::Id("present".into()))));
    assert_eq!(miss, None);
    assert!(evaluated(&log)[0].contains(r#"document.getElementById("present") !== null"#));
}

#[tokio::test]
async fn test_push_state_and_scroll_scripts() {
    let (_client, page, log) = open(browser(|_| Ok(value(Value::Bool(true))))).await;

    page.push_state("/app/new").await.unwrap();
    let element = ElementHandle::new(ElementQuery::Id("model-response-message-contentr_3".into()));
    page.scroll_into_view(&element, ScrollOptions::smooth_center())
        .await
        .unwrap();

    let scripts = evaluated(&log);
    assert!(scripts[0].contains(r#"history.pushState({}, "", "/app/new")"#));
    assert!(scripts[1].contains(r#"getElementById("model-response-message-contentr_3")"#));
    assert!(scripts[1].contains(r#""behavior":"smooth""#));
}

#[tokio::test]
async fn test_style_roundtrip_values() {
    let (_client, page, _log) = open(browser(|expr| {
        if expr.contains("getPropertyValue") {
            Ok(value(json!("rgb(0, 0, 255)")))
        } else {
            Ok(value(Value::Bool(true)))
        }
    }))
    .await;
    let element = ElementHandle::new(ElementQuery::Id("x".into()));

    assert_eq!(
        page.style_property(&element, "background-color").await.unwrap(),
        "rgb(0, 0, 255)"
    );
    page.set_style_property(&element, "background-color", "")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_detached_element_is_script_error() {
    let (_client, page, _log) = open(browser(|_| Ok(value(Value::Null)))).await;
    let element = ElementHandle::new(ElementQuery::Id("gone".into()));

    let result = page.style_property(&element, "background-color").await;
    assert!(matches!(result, Err(PageError::Script(_))));

    let result = page
        .scroll_into_view(&element, ScrollOptions::smooth_center())
        .await;
    assert!(matches!(result, Err(PageError::Script(_))));
}

#[tokio::test]
async fn test_exception_maps_to_script_error() {
    let (_client, page, _log) = open(browser(|_| {
        Ok(json!({
            "result": {"type": "object"},
            "exceptionDetails": {
                "exceptionId": 1,
                "text": "Uncaught",
                "lineNumber": 0,
                "columnNumber": 0,
                "exception": {"type": "object", "description": "SyntaxError: bad"}
            }
        }))
    }))
    .await;

    let result = page.location().await;
    assert!(matches!(result, Err(PageError::Script(m)) if m.contains("SyntaxError")));
}

#[tokio::test]
async fn test_protocol_error_maps_to_transport() {
    let (_client, page, _log) = open(browser(|_| {
        Err((-32000, "Cannot find default execution context".to_string()))
    }))
    .await;

    let result = page.assign("https://chatgpt.com/c/abc").await;
    assert!(matches!(result, Err(PageError::Transport(m)) if m.contains("execution context")));
}

fn ready_state(state: &str, href: &str) -> Result<Value, (i64, String)> {
    Ok(value(json!({"state": state, "href": href})))
}

const OLD: &str = "https://chatgpt.com/c/old";
const NEW: &str = "https://chatgpt.com/c/new?bookmark=t1";

#[tokio::test]
async fn test_wait_for_navigation_needs_new_href_and_ready_document() {
    let polls = Arc::new(AtomicUsize::new(0));
    let counter = polls.clone();
    let (_client, page, _log) = open(browser(move |expr| {
        if !expr.contains("document.readyState") {
            return Ok(value(Value::Null));
        }
        match counter.fetch_add(1, Ordering::SeqCst) {
            0 => ready_state("complete", OLD),
            1 => Err((-32000, "Execution context was destroyed.".to_string())),
            2 => ready_state("loading", NEW),
            _ => ready_state("complete", NEW),
        }
    }))
    .await;

    page.session()
        .wait_for_navigation(OLD, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(polls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_wait_for_navigation_accepts_interactive() {
    let (_client, page, log) = open(browser(|_| ready_state("interactive", NEW))).await;

    page.session()
        .wait_for_navigation("about:blank", Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(evaluated(&log).len(), 1);
}

#[tokio::test]
async fn test_wait_for_navigation_times_out_on_same_href() {
    let (_client, page, log) = open(browser(|_| ready_state("complete", OLD))).await;

    let result = page
        .session()
        .wait_for_navigation(OLD, Duration::from_millis(250))
        .await;

    assert!(matches!(result, Err(CdpError::Timeout(m)) if m.contains(OLD)));
    assert!(evaluated(&log).len() >= 2);
}
