//! Test doubles shared by the unit tests

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::MenuItem;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Canned backend reply
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(Value),
    Text(String),
    Status(u16, String),
}

impl MockReply {
    fn into_result(self) -> ClientResult<Value> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Text(text) => Ok(Value::String(text)),
            Self::Status(status, body) => Err(ClientError::Api { status, body }),
        }
    }
}

/// Backend double routing by URL path
pub struct MockHttp {
    pub menu: Mutex<MockReply>,
    pub activation: Mutex<MockReply>,
    pub order: Mutex<MockReply>,
    pub calls: Mutex<Vec<String>>,
    pub last_body: Mutex<Option<Value>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self {
            menu: Mutex::new(MockReply::Json(json!([]))),
            activation: Mutex::new(MockReply::Text("Activation Success".into())),
            order: Mutex::new(MockReply::Text("OK".into())),
            calls: Mutex::new(Vec::new()),
            last_body: Mutex::new(None),
        }
    }

    pub fn with_menu(self, records: Value) -> Self {
        self.set_menu(MockReply::Json(records));
        self
    }

    pub fn set_menu(&self, reply: MockReply) {
        *self.menu.lock().unwrap() = reply;
    }

    pub fn set_activation(&self, reply: MockReply) {
        *self.activation.lock().unwrap() = reply;
    }

    pub fn set_order(&self, reply: MockReply) {
        *self.order.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }

    fn reply_for(&self, method: &str, url: &str) -> ClientResult<Value> {
        self.calls.lock().unwrap().push(format!("{} {}", method, url));
        let reply = if url.ends_with("/menu/list/all") {
            self.menu.lock().unwrap().clone()
        } else if url.contains("/activation/") {
            self.activation.lock().unwrap().clone()
        } else if url.ends_with("/order/save") {
            self.order.lock().unwrap().clone()
        } else {
            MockReply::Status(404, "Not Found".into())
        };
        reply.into_result()
    }
}

fn as_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[async_trait]
impl HttpClient for MockHttp {
    async fn get<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        let value = self.reply_for("GET", url)?;
        serde_json::from_value(value).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn post_empty(&self, url: &str) -> ClientResult<String> {
        self.reply_for("POST", url).map(as_text)
    }

    async fn post<B: Serialize + Sync>(&self, url: &str, body: &B) -> ClientResult<String> {
        *self.last_body.lock().unwrap() = Some(serde_json::to_value(body)?);
        self.reply_for("POST", url).map(as_text)
    }
}

/// Catalog records in the backend's wire format
pub fn remote_records(items: &[(i64, &str, &str)]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|(id, code, name)| {
                json!({ "id": id, "code": code, "fullName": name, "quantityType": "portion" })
            })
            .collect(),
    )
}

pub fn menu_item(code: &str, name: &str) -> MenuItem {
    MenuItem::new(1, code, name, "portion")
}
