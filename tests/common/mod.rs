// 测试用模拟后端
// actix-web 提供 REST 接口，tokio-tungstenite 提供 Pusher 协议广播服务

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use affiliate_panel::realtime::dashboard_channel;
use affiliate_panel::{ApiClient, MemorySessionStore, SessionStore};
use futures_util::{SinkExt, StreamExt};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

pub const TOKEN: &str = "good-token";
/// 已登录但尚未完成2FA的令牌
pub const TWO_FACTOR_PENDING_TOKEN: &str = "pending-2fa-token";
/// 登录用户ID与联盟资料ID不同
pub const USER_ID: u64 = 7;
pub const PROFILE_ID: u64 = 31;
pub const APP_KEY: &str = "app-key";
pub const APP_SECRET: &str = "app-secret";
pub const SOCKET_ID: &str = "1234.5678";
pub const INVALID_CODE: &str = "The provided two factor authentication code was invalid.";

/// 模拟后端记录的请求
#[derive(Default)]
pub struct Recorded {
    pub requests: Mutex<Vec<String>>,
    pub bodies: Mutex<Vec<Value>>,
    pub postbacks: Mutex<Vec<Value>>,
}

impl Recorded {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.bodies.lock().unwrap().last().cloned()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub recorded: Arc<Recorded>,
}

impl MockBackend {
    /// 客户端与会话
    pub fn client(&self, token: Option<&str>) -> (ApiClient, Arc<MemorySessionStore>) {
        let session = Arc::new(match token {
            Some(token) => MemorySessionStore::with_token(token),
            None => MemorySessionStore::default(),
        });
        let store: Arc<dyn SessionStore> = session.clone();
        let client = ApiClient::new(&self.base_url, Duration::from_secs(5), store).unwrap();
        (client, session)
    }
}

/// Pusher 私有频道签名: HMAC-SHA256(secret, "socket_id:channel")
pub fn channel_signature(socket_id: &str, channel: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(APP_SECRET.as_bytes()).unwrap();
    mac.update(format!("{}:{}", socket_id, channel).as_bytes());
    format!("{}:{}", APP_KEY, hex::encode(mac.finalize().into_bytes()))
}

fn record(data: &web::Data<Arc<Recorded>>, req: &HttpRequest) {
    let line = match req.query_string() {
        "" => format!("{} {}", req.method(), req.path()),
        query => format!("{} {}?{}", req.method(), req.path(), query),
    };
    data.requests.lock().unwrap().push(line);
}

fn authorized(req: &HttpRequest) -> bool {
    bearer(req) == Some(TOKEN)
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "message": "Unauthenticated." }))
}

fn paginated(data: Vec<Value>, website_url: Option<&str>) -> Value {
    let total = data.len();
    json!({
        "data": data,
        "links": { "first": null, "last": null, "prev": null, "next": null },
        "meta": {
            "current_page": 1, "from": if total > 0 { json!(1) } else { Value::Null },
            "last_page": 1, "links": [], "path": "/", "per_page": 15,
            "to": if total > 0 { json!(total) } else { Value::Null },
            "total": total, "website_url": website_url
        }
    })
}

fn lead(id: u64) -> Value {
    json!({
        "id": id, "email": format!("lead{}@example.com", id), "status": "active",
        "total_commission_earned": 1250, "country": "NL",
        "signed_up_at": "2024-05-01T10:00:00Z"
    })
}

async fn login(data: web::Data<Arc<Recorded>>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    record(&data, &req);
    if body["password"] != "secret" {
        return HttpResponse::UnprocessableEntity()
            .json(json!({ "message": "These credentials do not match our records." }));
    }
    HttpResponse::Ok().json(json!({
        "data": {
            "token": TOKEN,
            "user": {
                "id": USER_ID, "name": "Jane Doe", "username": body["username"],
                "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
            }
        }
    }))
}

async fn dashboard_stats(data: web::Data<Arc<Recorded>>, req: HttpRequest) -> HttpResponse {
    record(&data, &req);
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "data": { "total_clicks": 120, "total_leads": 14, "total_customers": 3, "total_earnings": 45050 }
    }))
}

async fn leads(data: web::Data<Arc<Recorded>>, req: HttpRequest) -> HttpResponse {
    record(&data, &req);
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(paginated(vec![lead(2), lead(1)], None))
}

async fn list_links(data: web::Data<Arc<Recorded>>, req: HttpRequest) -> HttpResponse {
    record(&data, &req);
    let link = json!({
        "id": "lnk_1", "reference_id": "promo1", "url": "https://example.com?ref=promo1",
        "clicks_count": 3, "created_at": "2024-05-01T10:00:00Z"
    });
    HttpResponse::Ok().json(paginated(vec![link], Some("https://example.com")))
}

async fn create_link(data: web::Data<Arc<Recorded>>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    record(&data, &req);
    data.bodies.lock().unwrap().push(body.0.clone());
    let reference_id = body.get("reference_id").and_then(Value::as_str).unwrap_or("generated");
    HttpResponse::Created().json(json!({
        "data": {
            "id": "lnk_2", "reference_id": reference_id,
            "url": format!("https://example.com?ref={}", reference_id),
            "clicks_count": 0, "created_at": "2024-05-02T10:00:00Z"
        }
    }))
}

async fn validate_link(data: web::Data<Arc<Recorded>>, req: HttpRequest) -> HttpResponse {
    record(&data, &req);
    if req.query_string().contains("missing") {
        return HttpResponse::NotFound().json(json!({ "message": "No query results." }));
    }
    HttpResponse::Ok().json(json!({ "valid": true, "message": "Link is active" }))
}

fn bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

async fn profile(data: web::Data<Arc<Recorded>>, req: HttpRequest) -> HttpResponse {
    record(&data, &req);
    match bearer(&req) {
        Some(TOKEN) => HttpResponse::Ok().json(json!({
            "data": {
                "id": PROFILE_ID, "company_name": "Doe Media", "email": "jane@example.com",
                "contact_person": "Jane Doe", "phone": null, "website": "https://example.com",
                "telegram": null, "lc_country_id": 528, "address": null,
                "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
            }
        })),
        Some(TWO_FACTOR_PENDING_TOKEN) => HttpResponse::BadRequest()
            .insert_header(("x-authentication-error", "2fa-missing"))
            .json(json!({ "message": "Two factor authentication required." })),
        _ => unauthorized(),
    }
}

async fn recovery_codes(data: web::Data<Arc<Recorded>>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    record(&data, &req);
    if body["code"] != "123456" {
        return HttpResponse::UnprocessableEntity().json(json!({
            "message": INVALID_CODE,
            "errors": { "code": [INVALID_CODE] }
        }));
    }
    HttpResponse::Ok().json(json!({ "data": { "recovery_codes": ["aaaa-bbbb", "cccc-dddd"] } }))
}

async fn enable_two_factor(data: web::Data<Arc<Recorded>>, req: HttpRequest) -> HttpResponse {
    record(&data, &req);
    HttpResponse::Ok().json(json!({
        "message": "Two-factor authentication enabled.",
        "data": { "svg": "<svg>setup</svg>", "secret": "JBSWY3DPEHPK3PXP" }
    }))
}

async fn two_factor_qr_code(data: web::Data<Arc<Recorded>>, req: HttpRequest) -> HttpResponse {
    record(&data, &req);
    HttpResponse::Ok().json(json!({ "qr_code": "<svg>refreshed</svg>" }))
}

async fn disable_two_factor(data: web::Data<Arc<Recorded>>, req: HttpRequest) -> HttpResponse {
    record(&data, &req);
    HttpResponse::UnprocessableEntity().json(json!({ "message": "Two-factor code expired, request a new one." }))
}

async fn list_postbacks(data: web::Data<Arc<Recorded>>, req: HttpRequest) -> HttpResponse {
    record(&data, &req);
    let postbacks = data.postbacks.lock().unwrap().clone();
    HttpResponse::Ok().json(json!({ "data": postbacks }))
}

async fn create_postback(data: web::Data<Arc<Recorded>>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    record(&data, &req);
    data.bodies.lock().unwrap().push(body.0.clone());
    let mut postbacks = data.postbacks.lock().unwrap();
    let postback = json!({
        "id": format!("pb_{}", postbacks.len() + 1),
        "url": body["url"], "method": body["method"], "events": body["events"],
        "is_active": true, "secret": "0123456789abcdef",
        "headers": body.get("headers").cloned().unwrap_or_else(|| json!([])),
        "body": body.get("body").cloned().unwrap_or(Value::Null),
        "created_at": "2024-05-01T10:00:00Z", "updated_at": "2024-05-01T10:00:00Z"
    });
    postbacks.push(postback.clone());
    HttpResponse::Created().json(json!({ "data": postback }))
}

async fn toggle_postback(
    data: web::Data<Arc<Recorded>>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    record(&data, &req);
    let mut postbacks = data.postbacks.lock().unwrap();
    match postbacks.iter_mut().find(|p| p["id"] == path.as_str()) {
        Some(postback) => {
            let active = postback["is_active"].as_bool().unwrap_or(false);
            postback["is_active"] = json!(!active);
            HttpResponse::Ok().json(json!({ "data": postback.clone() }))
        }
        None => HttpResponse::NotFound().json(json!({ "message": "Not found" })),
    }
}

async fn delete_postback(
    data: web::Data<Arc<Recorded>>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    record(&data, &req);
    let mut postbacks = data.postbacks.lock().unwrap();
    let before = postbacks.len();
    postbacks.retain(|p| p["id"] != path.as_str());
    if postbacks.len() == before {
        return HttpResponse::NotFound().json(json!({ "message": "Not found" }));
    }
    HttpResponse::NoContent().finish()
}

async fn delete_payout(data: web::Data<Arc<Recorded>>, req: HttpRequest) -> HttpResponse {
    record(&data, &req);
    HttpResponse::BadRequest().json(json!({ "message": "Default payout option cannot be removed." }))
}

async fn broadcasting_auth(data: web::Data<Arc<Recorded>>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    record(&data, &req);
    if !authorized(&req) {
        return HttpResponse::Forbidden().finish();
    }
    let socket_id = body["socket_id"].as_str().unwrap_or_default();
    let channel = body["channel_name"].as_str().unwrap_or_default();
    // 只允许订阅自己资料ID对应的频道
    if channel != dashboard_channel(PROFILE_ID) {
        return HttpResponse::Forbidden().finish();
    }
    HttpResponse::Ok().json(json!({ "auth": channel_signature(socket_id, channel) }))
}

/// 启动模拟后端
pub async fn start_backend() -> MockBackend {
    let recorded = Arc::new(Recorded::default());
    let data = web::Data::new(recorded.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/login", web::post().to(login))
            .route("/stats/dashboard", web::get().to(dashboard_stats))
            .route("/leads", web::get().to(leads))
            .route("/links", web::get().to(list_links))
            .route("/links", web::post().to(create_link))
            .route("/links/validate", web::get().to(validate_link))
            .route("/account/profile", web::get().to(profile))
            .route("/account/two-factor-recovery-codes/view", web::post().to(recovery_codes))
            .route("/account/two-factor-authentication", web::post().to(enable_two_factor))
            .route("/account/two-factor-authentication", web::delete().to(disable_two_factor))
            .route("/account/two-factor-qr-code", web::get().to(two_factor_qr_code))
            .route("/postbacks", web::get().to(list_postbacks))
            .route("/postbacks", web::post().to(create_postback))
            .route("/postbacks/{id}/toggle", web::patch().to(toggle_postback))
            .route("/postbacks/{id}", web::delete().to(delete_postback))
            .route("/payouts/{id}", web::delete().to(delete_payout))
            .route("/broadcasting/auth", web::post().to(broadcasting_auth))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    MockBackend {
        base_url: format!("http://{}", addr),
        recorded,
    }
}

/// 模拟广播服务收到的客户端帧
#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedFrame {
    Subscribe { channel: String, auth: String },
    Unsubscribe { channel: String },
}

/// 启动模拟广播服务：建立连接后对每个订阅校验签名，
/// 通过 `push` 发送频道事件
pub async fn start_broadcaster() -> (SocketAddr, mpsc::UnboundedSender<Value>, mpsc::UnboundedReceiver<ReceivedFrame>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (push_tx, mut push_rx) = mpsc::unbounded_channel::<Value>();
    let (frame_tx, frame_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();

        let established = json!({
            "event": "pusher:connection_established",
            "data": json!({ "socket_id": SOCKET_ID, "activity_timeout": 30 }).to_string()
        });
        socket.send(Message::Text(established.to_string())).await.unwrap();

        loop {
            tokio::select! {
                incoming = socket.next() => {
                    let Some(Ok(Message::Text(text))) = incoming else {
                        break;
                    };
                    let frame: Value = serde_json::from_str(&text).unwrap();
                    let channel = frame["data"]["channel"].as_str().unwrap_or_default().to_string();
                    match frame["event"].as_str() {
                        Some("pusher:subscribe") => {
                            let auth = frame["data"]["auth"].as_str().unwrap_or_default().to_string();
                            let reply = if auth == channel_signature(SOCKET_ID, &channel) {
                                json!({ "event": "pusher_internal:subscription_succeeded", "channel": channel, "data": "{}" })
                            } else {
                                json!({ "event": "pusher:subscription_error", "channel": channel,
                                        "data": { "type": "AuthError", "error": "Invalid signature", "status": 401 } })
                            };
                            let _ = frame_tx.send(ReceivedFrame::Subscribe { channel, auth });
                            socket.send(Message::Text(reply.to_string())).await.unwrap();
                        }
                        Some("pusher:unsubscribe") => {
                            let _ = frame_tx.send(ReceivedFrame::Unsubscribe { channel });
                        }
                        _ => {}
                    }
                }
                push = push_rx.recv() => {
                    let Some(event) = push else {
                        break;
                    };
                    socket.send(Message::Text(event.to_string())).await.unwrap();
                }
            }
        }
    });

    (addr, push_tx, frame_rx)
}
