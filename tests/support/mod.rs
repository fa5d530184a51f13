#![allow(dead_code)]

use game_shelf::{api::HttpGameApi, build_router, config, AppState};

use std::{
    collections::HashMap,
    net::{SocketAddr, TcpListener},
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Multipart, Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use url::Url;

pub const PNG_HEADER: [u8; 16] = [
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

pub const MEDIA_URL: &str = "http://backend.test/media/";

const GENRES: [&str; 6] = ["rpg", "accion", "aventura", "estrategia", "deportes", "otros"];

/// What the backend saw in the `imagen` field of the last save.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageField {
    Absent,
    Cleared,
    File(String),
}

#[derive(Debug)]
pub struct BackendState {
    next_id: i64,
    pub games: Vec<Value>,
    pub requests: usize,
    pub last_query: Option<String>,
    pub last_image_field: Option<ImageField>,
    /// Status every list request answers with instead of the collection.
    pub list_failure: Option<StatusCode>,
}

impl Default for BackendState {
    fn default() -> Self {
        return Self {
            next_id: 1,
            games: vec![],
            requests: 0,
            last_query: None,
            last_image_field: None,
            list_failure: None,
        };
    }
}

/// A REST backend good enough to exercise the client: same routes, same
/// envelopes, same error shapes.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub async fn spawn() -> (Self, Url) {
        let backend = Self::default();

        let router = Router::new()
            .route("/api/games/", get(list).post(create))
            .route("/api/games/plataformas/", get(platforms))
            .route("/api/games/generos/", get(genres))
            .route("/api/games/estadisticas/", get(stats))
            .route("/api/games/:id/", get(fetch).put(update).delete(remove))
            .with_state(backend.clone());

        let addr = serve(router);
        let base = format!("http://{addr}/api/games/").parse().unwrap();

        return (backend, base);
    }

    pub fn requests(&self) -> usize {
        return self.state.lock().unwrap().requests;
    }

    pub fn last_query(&self) -> Option<String> {
        return self.state.lock().unwrap().last_query.clone();
    }

    pub fn last_image_field(&self) -> Option<ImageField> {
        return self.state.lock().unwrap().last_image_field.clone();
    }

    pub fn fail_list(&self) {
        self.state.lock().unwrap().list_failure = Some(StatusCode::INTERNAL_SERVER_ERROR);
    }

    pub fn throttle_list(&self) {
        self.state.lock().unwrap().list_failure = Some(StatusCode::TOO_MANY_REQUESTS);
    }

    pub fn games(&self) -> Vec<Value> {
        return self.state.lock().unwrap().games.clone();
    }

    pub fn seed(&self, nombre: &str, plataforma: &str, estado: &str, genero: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.games.push(json!({
            "id": id,
            "nombre": nombre,
            "descripcion": "",
            "plataforma": plataforma,
            "estado": estado,
            "genero": genero,
            "horas_jugadas": 0,
            "fecha_lanzamiento": null,
            "calificacion": null,
            "imagen_url": null,
            "fecha_creacion": "2024-05-01T10:00:00Z",
        }));
        return id;
    }
}

pub fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(router.into_make_service());
    tokio::spawn(server);
    return addr;
}

/// An address nothing listens on.
pub fn dead_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    return format!("http://{addr}/api/games/").parse().unwrap();
}

pub fn api_for(base: Url) -> HttpGameApi {
    return HttpGameApi::new(reqwest::Client::new(), base);
}

/// Serves the browser-facing app against `backend`.
pub fn spawn_app(backend: &Url) -> Url {
    let cfg = config::from_lookup(|key| match key {
        "API_BASE_URL" => Some(backend.to_string()),
        "API_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap();

    let api = api_for(backend.clone());
    let router = build_router(AppState::new(cfg, Arc::new(api)));

    let addr = serve(router);
    return format!("http://{addr}").parse().unwrap();
}

/// A browser that lets the test see redirects instead of following them.
pub fn browser() -> reqwest::Client {
    return reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
}

fn hit(backend: &FakeBackend) {
    backend.state.lock().unwrap().requests += 1;
}

fn not_found() -> Response {
    return (StatusCode::NOT_FOUND, Json(json!({"detail": "No encontrado."}))).into_response();
}

fn contains(haystack: &Value, needle: &str) -> bool {
    return haystack
        .as_str()
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false);
}

async fn list(
    State(backend): State<FakeBackend>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hit(&backend);
    let mut state = backend.state.lock().unwrap();
    state.last_query = raw;

    if let Some(status) = state.list_failure {
        return (status, Json(json!({"detail": "No disponible."}))).into_response();
    }

    let number = |key: &str| params.get(key).and_then(|v| v.parse::<i64>().ok());

    let results: Vec<Value> = state
        .games
        .iter()
        .filter(|game| match params.get("search") {
            Some(term) => ["nombre", "descripcion", "plataforma"]
                .iter()
                .any(|field| contains(&game[*field], term)),
            None => true,
        })
        .filter(|game| match params.get("estado") {
            Some(estado) => game["estado"] == json!(estado),
            None => true,
        })
        .filter(|game| match params.get("genero") {
            Some(genero) => game["genero"] == json!(genero),
            None => true,
        })
        .filter(|game| match params.get("plataforma") {
            Some(plataforma) => contains(&game["plataforma"], plataforma),
            None => true,
        })
        .filter(|game| match number("calificacion_min") {
            Some(min) => game["calificacion"].as_i64().map_or(false, |c| c >= min),
            None => true,
        })
        .filter(|game| match number("horas_min") {
            Some(min) => game["horas_jugadas"].as_i64().unwrap_or(0) >= min,
            None => true,
        })
        .cloned()
        .collect();

    return Json(json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    }))
    .into_response();
}

struct Submitted {
    fields: HashMap<String, String>,
    image: ImageField,
}

async fn read_submission(mut multipart: Multipart) -> Submitted {
    let mut fields = HashMap::new();
    let mut image = ImageField::Absent;

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();

        if name == "imagen" {
            image = match field.file_name().map(str::to_string) {
                Some(file_name) => ImageField::File(file_name),
                None => ImageField::Cleared,
            };
            field.bytes().await.unwrap();
            continue;
        }

        fields.insert(name, field.text().await.unwrap());
    }

    return Submitted { fields, image };
}

fn validate(fields: &HashMap<String, String>) -> Result<(), Response> {
    let mut errors = serde_json::Map::new();

    let name = fields.get("nombre").map(|n| n.trim()).unwrap_or_default();
    if name.chars().count() < 2 {
        errors.insert(
            "nombre".to_string(),
            json!(["El nombre debe tener al menos 2 caracteres."]),
        );
    }

    let hours = fields
        .get("horas_jugadas")
        .and_then(|h| h.parse::<i64>().ok())
        .unwrap_or(0);
    if hours > 9999 {
        errors.insert(
            "horas_jugadas".to_string(),
            json!(["Las horas jugadas no pueden exceder 9999."]),
        );
    }

    if errors.is_empty() {
        return Ok(());
    }

    return Err((StatusCode::BAD_REQUEST, Json(Value::Object(errors))).into_response());
}

fn nullable(fields: &HashMap<String, String>, key: &str) -> Value {
    return match fields.get(key).map(String::as_str) {
        None | Some("") => Value::Null,
        Some(value) => match value.parse::<i64>() {
            Ok(number) => json!(number),
            Err(_) => json!(value),
        },
    };
}

fn apply(game: &mut Value, fields: &HashMap<String, String>) {
    for key in ["nombre", "descripcion", "plataforma", "estado", "genero"] {
        game[key] = json!(fields.get(key).cloned().unwrap_or_default());
    }
    game["horas_jugadas"] = json!(fields
        .get("horas_jugadas")
        .and_then(|h| h.parse::<i64>().ok())
        .unwrap_or(0));
    game["fecha_lanzamiento"] = nullable(fields, "fecha_lanzamiento");
    game["calificacion"] = nullable(fields, "calificacion");
}

async fn create(State(backend): State<FakeBackend>, multipart: Multipart) -> Response {
    hit(&backend);
    let submitted = read_submission(multipart).await;

    if let Err(rejection) = validate(&submitted.fields) {
        return rejection;
    }

    let mut state = backend.state.lock().unwrap();
    let id = state.next_id;
    state.next_id += 1;

    let mut game = json!({"id": id, "fecha_creacion": "2024-05-01T10:00:00Z"});
    apply(&mut game, &submitted.fields);
    game["imagen_url"] = match &submitted.image {
        ImageField::File(name) => json!(format!("{MEDIA_URL}{name}")),
        _ => Value::Null,
    };

    state.last_image_field = Some(submitted.image);
    state.games.push(game.clone());

    return (
        StatusCode::CREATED,
        Json(json!({"message": "Juego creado exitosamente", "data": game})),
    )
        .into_response();
}

async fn fetch(State(backend): State<FakeBackend>, Path(id): Path<i64>) -> Response {
    hit(&backend);
    let state = backend.state.lock().unwrap();

    return match state.games.iter().find(|g| g["id"] == json!(id)) {
        Some(game) => Json(game.clone()).into_response(),
        None => not_found(),
    };
}

async fn update(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Response {
    hit(&backend);
    let submitted = read_submission(multipart).await;

    if let Err(rejection) = validate(&submitted.fields) {
        return rejection;
    }

    let mut state = backend.state.lock().unwrap();
    state.last_image_field = Some(submitted.image.clone());

    let Some(game) = state.games.iter_mut().find(|g| g["id"] == json!(id)) else {
        return not_found();
    };

    apply(game, &submitted.fields);
    match &submitted.image {
        ImageField::Absent => {}
        ImageField::Cleared => game["imagen_url"] = Value::Null,
        ImageField::File(name) => game["imagen_url"] = json!(format!("{MEDIA_URL}{name}")),
    }

    return Json(game.clone()).into_response();
}

async fn remove(State(backend): State<FakeBackend>, Path(id): Path<i64>) -> Response {
    hit(&backend);
    let mut state = backend.state.lock().unwrap();

    let before = state.games.len();
    state.games.retain(|g| g["id"] != json!(id));
    if state.games.len() == before {
        return not_found();
    }

    return StatusCode::NO_CONTENT.into_response();
}

async fn platforms(State(backend): State<FakeBackend>) -> Json<Vec<String>> {
    hit(&backend);
    let state = backend.state.lock().unwrap();

    let mut platforms: Vec<String> = state
        .games
        .iter()
        .filter_map(|g| g["plataforma"].as_str().map(str::to_string))
        .collect();
    platforms.sort();
    platforms.dedup();

    return Json(platforms);
}

async fn genres(State(backend): State<FakeBackend>) -> Json<Vec<&'static str>> {
    hit(&backend);
    return Json(GENRES.to_vec());
}

async fn stats(State(backend): State<FakeBackend>) -> Json<Value> {
    hit(&backend);
    let state = backend.state.lock().unwrap();

    let count = |estado: &str| state.games.iter().filter(|g| g["estado"] == json!(estado)).count();
    let ratings: Vec<i64> = state
        .games
        .iter()
        .filter_map(|g| g["calificacion"].as_i64())
        .collect();
    let average = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<i64>() as f64 / ratings.len() as f64
    };

    return Json(json!({
        "total_juegos": state.games.len(),
        "juegos_completados": count("completado"),
        "juegos_jugando": count("jugando"),
        "juegos_sin_iniciar": count("sin iniciar"),
        "juegos_abandonados": count("abandonado"),
        "total_horas_jugadas": state.games.iter().map(|g| g["horas_jugadas"].as_i64().unwrap_or(0)).sum::<i64>(),
        "calificacion_promedio": average,
    }));
}
