#![allow(dead_code)]

use actix_web::{dev::ServerHandle, web, App, HttpResponse, HttpServer, Responder};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use walking_tour_api::app_state::AppState;
use walking_tour_api::config::AppConfig;
use walking_tour_api::services::narration_service::{SpeechPlayback, Utterance};

pub const ROME_ROUTE: &str = "Start Point: Colosseum

Route:
1. Colosseum
2. Roman Forum
3. Pantheon
4. Trevi Fountain
5. Colosseum

Enjoy your walk!";

/// How the stand-in upstream answers.
#[derive(Clone)]
pub struct Behaviour {
    pub completion: String,
    pub completion_status: u16,
    pub tour_status: u16,
    pub tour_id: Value,
    pub city_photo: Option<String>,
    pub photo_status: u16,
    pub unresolved_places: HashSet<String>,
    pub places_without_photos: HashSet<String>,
    pub failing_points: HashSet<String>,
    pub place_delays: HashMap<String, u64>,
    pub commentary: String,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            completion: ROME_ROUTE.to_string(),
            completion_status: 200,
            tour_status: 201,
            tour_id: json!(42),
            city_photo: Some("https://images.example.com/rome.jpg".to_string()),
            photo_status: 200,
            unresolved_places: HashSet::new(),
            places_without_photos: HashSet::new(),
            failing_points: HashSet::new(),
            place_delays: HashMap::new(),
            commentary: "Built in 80 AD, the Colosseum held fifty thousand spectators.".to_string(),
        }
    }
}

/// Every request the upstream saw, in arrival order.
#[derive(Default)]
pub struct Recorded {
    pub completions: Mutex<Vec<(Option<String>, Value)>>,
    pub place_lookups: Mutex<Vec<HashMap<String, String>>>,
    pub place_details: Mutex<Vec<HashMap<String, String>>>,
    pub photo_searches: Mutex<Vec<HashMap<String, String>>>,
    pub tours: Mutex<Vec<Value>>,
    pub points_of_interest: Mutex<Vec<Value>>,
    pub commentary_requests: Mutex<Vec<String>>,
}

impl Recorded {
    pub fn tours(&self) -> Vec<Value> {
        self.tours.lock().unwrap().clone()
    }

    pub fn points_of_interest(&self) -> Vec<Value> {
        self.points_of_interest.lock().unwrap().clone()
    }

    pub fn completions(&self) -> Vec<(Option<String>, Value)> {
        self.completions.lock().unwrap().clone()
    }

    pub fn place_lookups(&self) -> Vec<HashMap<String, String>> {
        self.place_lookups.lock().unwrap().clone()
    }

    pub fn photo_searches(&self) -> Vec<HashMap<String, String>> {
        self.photo_searches.lock().unwrap().clone()
    }
}

pub struct Upstream {
    pub base_url: String,
    pub recorded: Arc<Recorded>,
    handle: ServerHandle,
}

impl Upstream {
    pub async fn start(behaviour: Behaviour) -> Self {
        let recorded = Arc::new(Recorded::default());
        let behaviour = Arc::new(behaviour);

        let server_recorded = recorded.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::from(server_recorded.clone()))
                .app_data(web::Data::from(behaviour.clone()))
                .route("/v1/chat/completions", web::post().to(completions))
                .route(
                    "/maps/api/place/findplacefromtext/json",
                    web::get().to(find_place),
                )
                .route("/maps/api/place/details/json", web::get().to(place_details))
                .route("/search/photos", web::get().to(search_photos))
                .route("/tours", web::post().to(create_tour))
                .route("/pointofinterest", web::post().to(create_point_of_interest))
                .route("/commentary/{id}", web::get().to(commentary))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stand-in upstream");

        let port = server.addrs()[0].port();
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            recorded,
            handle,
        }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::for_base_url(&self.base_url)
    }

    pub fn app_state(&self, playback: Arc<dyn SpeechPlayback>) -> AppState {
        AppState::new(self.config(), reqwest::Client::new(), playback)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn completions(
    req: actix_web::HttpRequest,
    body: web::Json<Value>,
    recorded: web::Data<Recorded>,
    behaviour: web::Data<Behaviour>,
) -> impl Responder {
    let auth = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    recorded
        .completions
        .lock()
        .unwrap()
        .push((auth, body.into_inner()));

    if behaviour.completion_status != 200 {
        return HttpResponse::build(status(behaviour.completion_status))
            .json(json!({ "error": { "message": "upstream unavailable" } }));
    }

    HttpResponse::Ok().json(json!({
        "id": "chatcmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": behaviour.completion } }
        ]
    }))
}

async fn find_place(
    query: web::Query<HashMap<String, String>>,
    recorded: web::Data<Recorded>,
    behaviour: web::Data<Behaviour>,
) -> impl Responder {
    let query = query.into_inner();
    let input = query.get("input").cloned().unwrap_or_default();
    recorded.place_lookups.lock().unwrap().push(query);

    if let Some(delay) = behaviour.place_delays.get(&input) {
        actix_web::rt::time::sleep(Duration::from_millis(*delay)).await;
    }

    if behaviour.unresolved_places.contains(&input) {
        return HttpResponse::Ok().json(json!({ "candidates": [], "status": "ZERO_RESULTS" }));
    }

    let (lat, lng) = coordinates_for(&input);
    HttpResponse::Ok().json(json!({
        "candidates": [
            {
                "geometry": { "location": { "lat": lat, "lng": lng } },
                "place_id": format!("place-{}", input)
            }
        ],
        "status": "OK"
    }))
}

async fn place_details(
    query: web::Query<HashMap<String, String>>,
    recorded: web::Data<Recorded>,
    behaviour: web::Data<Behaviour>,
) -> impl Responder {
    let query = query.into_inner();
    let place_id = query.get("place_id").cloned().unwrap_or_default();
    recorded.place_details.lock().unwrap().push(query);

    let name = place_id.trim_start_matches("place-");
    if behaviour.places_without_photos.contains(name) {
        return HttpResponse::Ok().json(json!({ "result": {}, "status": "OK" }));
    }

    HttpResponse::Ok().json(json!({
        "result": { "photos": [ { "photo_reference": format!("photo-{}", name.replace(' ', "-")) } ] },
        "status": "OK"
    }))
}

async fn search_photos(
    query: web::Query<HashMap<String, String>>,
    recorded: web::Data<Recorded>,
    behaviour: web::Data<Behaviour>,
) -> impl Responder {
    recorded.photo_searches.lock().unwrap().push(query.into_inner());

    if behaviour.photo_status != 200 {
        return HttpResponse::build(status(behaviour.photo_status)).finish();
    }

    match &behaviour.city_photo {
        Some(url) => HttpResponse::Ok().json(json!({
            "total": 1,
            "results": [ { "urls": { "regular": url, "small": url } } ]
        })),
        None => HttpResponse::Ok().json(json!({ "total": 0, "results": [] })),
    }
}

async fn create_tour(
    body: web::Json<Value>,
    recorded: web::Data<Recorded>,
    behaviour: web::Data<Behaviour>,
) -> impl Responder {
    recorded.tours.lock().unwrap().push(body.into_inner());

    if !(200..300).contains(&behaviour.tour_status) {
        return HttpResponse::build(status(behaviour.tour_status))
            .json(json!({ "error": "database unavailable" }));
    }

    HttpResponse::build(status(behaviour.tour_status)).json(json!({ "id": behaviour.tour_id }))
}

async fn create_point_of_interest(
    body: web::Json<Value>,
    recorded: web::Data<Recorded>,
    behaviour: web::Data<Behaviour>,
) -> impl Responder {
    let body = body.into_inner();
    let name = body["poi_name"].as_str().unwrap_or_default().to_string();
    recorded.points_of_interest.lock().unwrap().push(body);

    if behaviour.failing_points.contains(&name) {
        return HttpResponse::InternalServerError().json(json!({ "error": "insert failed" }));
    }
    HttpResponse::Created().json(json!({ "poi_name": name }))
}

async fn commentary(
    path: web::Path<String>,
    recorded: web::Data<Recorded>,
    behaviour: web::Data<Behaviour>,
) -> impl Responder {
    let id = path.into_inner();
    recorded.commentary_requests.lock().unwrap().push(id.clone());

    if id == "missing" {
        return HttpResponse::NotFound().json(json!({ "error": "Commentary not found" }));
    }
    HttpResponse::Ok().json(json!({ "id": id, "description": behaviour.commentary }))
}

fn status(code: u16) -> actix_web::http::StatusCode {
    actix_web::http::StatusCode::from_u16(code)
        .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn coordinates_for(name: &str) -> (f64, f64) {
    let len = name.len() as f64;
    (41.0 + len / 100.0, 12.0 + len / 1000.0)
}

/// Playback that only records what it was asked to do.
#[derive(Default)]
pub struct RecordingPlayback {
    pub spoken: Mutex<Vec<Utterance>>,
    pub cancels: Mutex<usize>,
    speaking: Mutex<bool>,
}

impl SpeechPlayback for RecordingPlayback {
    fn is_speaking(&self) -> bool {
        *self.speaking.lock().unwrap()
    }

    fn speak(&self, utterance: Utterance) {
        self.spoken.lock().unwrap().push(utterance);
        *self.speaking.lock().unwrap() = true;
    }

    fn cancel(&self) {
        *self.cancels.lock().unwrap() += 1;
        *self.speaking.lock().unwrap() = false;
    }
}
