//! End-to-end client behavior against an in-process fake of the notes service.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use notas_core::{
    Error, MemoryTokenStore, NewNote, Note, NoteId, NotePatch, NotesClient, Operation,
    SessionToken, TokenStore,
};
use pretty_assertions::assert_eq;
use serde::Deserialize;

#[derive(Default)]
struct FakeService {
    users: HashMap<String, String>,
    tokens: HashMap<String, String>,
    notes: BTreeMap<u64, (String, Note)>,
    next_id: u64,
    issued: u64,
}

type Shared = Arc<Mutex<FakeService>>;

#[derive(Deserialize)]
struct CredentialsBody {
    username: String,
    password: String,
}

fn bearer_user(state: &FakeService, headers: &HeaderMap) -> Result<String, StatusCode> {
    let header = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;
    state
        .tokens
        .get(token)
        .cloned()
        .ok_or(StatusCode::UNAUTHORIZED)
}

async fn register(
    State(state): State<Shared>,
    Json(body): Json<CredentialsBody>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    if state.users.contains_key(&body.username) {
        return StatusCode::CONFLICT;
    }
    state.users.insert(body.username, body.password);
    StatusCode::CREATED
}

async fn login(
    State(state): State<Shared>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut state = state.lock().unwrap();
    if state.users.get(&body.username) != Some(&body.password) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    state.issued += 1;
    let token = format!("token-{}-{}", body.username, state.issued);
    state.tokens.insert(token.clone(), body.username);
    Ok(Json(serde_json::json!({ "token": token })))
}

async fn list_notes(
    State(state): State<Shared>,
    headers: HeaderMap,
) -> Result<Json<Vec<Note>>, StatusCode> {
    let state = state.lock().unwrap();
    let user = bearer_user(&state, &headers)?;
    let notes = state
        .notes
        .values()
        .filter(|(owner, _)| *owner == user)
        .map(|(_, note)| note.clone())
        .collect();
    Ok(Json(notes))
}

async fn create_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(fields): Json<NewNote>,
) -> Result<(StatusCode, Json<Note>), StatusCode> {
    let mut state = state.lock().unwrap();
    let user = bearer_user(&state, &headers)?;
    state.next_id += 1;
    let note = Note {
        id: NoteId::new(state.next_id).unwrap(),
        title: fields.title,
        description: fields.description,
        completed: fields.completed,
    };
    state.notes.insert(note.id.get(), (user, note.clone()));
    Ok((StatusCode::CREATED, Json(note)))
}

fn owned_note(state: &FakeService, user: &str, id: u64) -> Result<Note, StatusCode> {
    match state.notes.get(&id) {
        Some((owner, note)) if owner == user => Ok(note.clone()),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn get_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<Note>, StatusCode> {
    let state = state.lock().unwrap();
    let user = bearer_user(&state, &headers)?;
    owned_note(&state, &user, id).map(Json)
}

async fn update_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(patch): Json<NotePatch>,
) -> Result<Json<Note>, StatusCode> {
    let mut state = state.lock().unwrap();
    let user = bearer_user(&state, &headers)?;
    let updated = patch.apply_to(&owned_note(&state, &user, id)?);
    state.notes.insert(id, (user, updated.clone()));
    Ok(Json(updated))
}

async fn delete_note(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut state = state.lock().unwrap();
    let user = bearer_user(&state, &headers)?;
    owned_note(&state, &user, id)?;
    state.notes.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn spawn_fake_service() -> (String, Shared) {
    let shared: Shared = Arc::new(Mutex::new(FakeService::default()));
    let api = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/tareas", get(list_notes).post(create_note))
        .route(
            "/tareas/{id}",
            get(get_note).put(update_note).delete(delete_note),
        );
    let app = Router::new()
        .nest("/api", api)
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake service");
    let address = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake service");
    });

    (format!("http://{address}/api"), shared)
}

async fn signed_in_client(email: &str) -> (NotesClient<MemoryTokenStore>, Shared) {
    let (url, shared) = spawn_fake_service().await;
    let client = NotesClient::new(&url, MemoryTokenStore::new()).unwrap();
    client.register(email, "password1").await.unwrap();
    client.login(email, "password1").await.unwrap();
    (client, shared)
}

fn draft(title: &str, description: &str) -> NewNote {
    NewNote::new(title).with_description(description)
}

#[tokio::test]
async fn login_then_token_returns_same_token() {
    let (url, _) = spawn_fake_service().await;
    let client = NotesClient::new(&url, MemoryTokenStore::new()).unwrap();
    client.register("a@b.com", "password1").await.unwrap();
    assert!(client.token().is_none(), "register must not sign in");

    let token = client.login("a@b.com", "password1").await.unwrap();
    assert!(!token.expose().is_empty());
    assert_eq!(client.token(), Some(token));
}

#[tokio::test]
async fn relogin_overwrites_token() {
    let (client, _) = signed_in_client("a@b.com").await;
    let first = client.token().unwrap();
    let second = client.login("a@b.com", "password1").await.unwrap();
    assert_ne!(first, second);
    assert_eq!(client.token(), Some(second));
}

#[tokio::test]
async fn logout_clears_token_and_blocks_authenticated_calls() {
    let (client, _) = signed_in_client("a@b.com").await;
    client.logout();
    assert!(client.token().is_none());
    assert!(matches!(
        client.list_notes().await,
        Err(Error::NotAuthenticated)
    ));
}

#[tokio::test]
async fn wrong_password_is_rejected_login() {
    let (url, _) = spawn_fake_service().await;
    let client = NotesClient::new(&url, MemoryTokenStore::new()).unwrap();
    client.register("a@b.com", "password1").await.unwrap();

    let error = client.login("a@b.com", "password2").await.unwrap_err();
    assert_eq!(error.operation(), Some(Operation::Login));
    assert!(error.is_rejected());
    assert!(client.token().is_none());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let (url, _) = spawn_fake_service().await;
    let client = NotesClient::new(&url, MemoryTokenStore::new()).unwrap();
    client.register("a@b.com", "password1").await.unwrap();

    let error = client.register("a@b.com", "password1").await.unwrap_err();
    assert_eq!(error.operation(), Some(Operation::Register));
    assert_eq!(error.status().map(|status| status.as_u16()), Some(409));
}

#[tokio::test]
async fn create_returns_input_fields_with_fresh_ids() {
    let (client, _) = signed_in_client("a@b.com").await;

    let fields = draft("T", "<b>D</b>");
    let first = client.create_note(&fields).await.unwrap();
    let second = client.create_note(&fields).await.unwrap();

    assert!(first.matches(&fields));
    assert!(second.matches(&fields));
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn create_trims_title_before_sending() {
    let (client, _) = signed_in_client("a@b.com").await;
    let note = client.create_note(&NewNote::new("  Padded  ")).await.unwrap();
    assert_eq!(note.title, "Padded");
}

#[tokio::test]
async fn get_after_create_returns_equal_note() {
    let (client, _) = signed_in_client("a@b.com").await;
    let created = client
        .create_note(&draft("Groceries", "milk").with_completed(true))
        .await
        .unwrap();

    let fetched = client.get_note(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_completed_changes_only_that_field() {
    let (client, _) = signed_in_client("a@b.com").await;
    let created = client.create_note(&draft("T", "D")).await.unwrap();

    let updated = client
        .update_note(created.id, &NotePatch::completed(true))
        .await
        .unwrap();
    let fetched = client.get_note(created.id).await.unwrap();

    let expected = Note {
        completed: true,
        ..created
    };
    assert_eq!(updated, expected);
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn delete_then_get_fails_naming_the_id() {
    let (client, _) = signed_in_client("a@b.com").await;
    let created = client.create_note(&draft("T", "D")).await.unwrap();

    client.delete_note(created.id).await.unwrap();
    let error = client.get_note(created.id).await.unwrap_err();

    assert_eq!(error.note_id(), Some(created.id));
    assert_eq!(error.operation(), Some(Operation::GetNote(created.id)));
    assert!(error
        .to_string()
        .contains(&format!("note {}", created.id)));
}

#[tokio::test]
async fn delete_missing_note_fails_naming_the_id() {
    let (client, _) = signed_in_client("a@b.com").await;
    let missing = NoteId::new(999).unwrap();

    let error = client.delete_note(missing).await.unwrap_err();
    assert_eq!(error.operation(), Some(Operation::DeleteNote(missing)));
}

#[tokio::test]
async fn scenario_create_list_delete() {
    let (url, _) = spawn_fake_service().await;
    let client = NotesClient::new(&url, MemoryTokenStore::new()).unwrap();
    client.register("a@b.com", "password1").await.unwrap();
    client.login("a@b.com", "password1").await.unwrap();
    assert!(client.token().is_some());

    let created = client.create_note(&draft("T", "D")).await.unwrap();
    assert_eq!(created.title, "T");
    assert_eq!(created.description, "D");
    assert!(!created.completed);

    let listed = client.list_notes().await.unwrap();
    assert!(listed.contains(&created));

    client.delete_note(created.id).await.unwrap();
    let listed = client.list_notes().await.unwrap();
    assert!(listed.iter().all(|note| note.id != created.id));
}

#[tokio::test]
async fn token_change_between_calls_is_honored() {
    let (url, _) = spawn_fake_service().await;
    let store = MemoryTokenStore::new();
    let client = NotesClient::new(&url, store.clone()).unwrap();
    client.register("a@b.com", "password1").await.unwrap();
    client.register("c@d.com", "password1").await.unwrap();

    client.login("a@b.com", "password1").await.unwrap();
    let note_a = client.create_note(&draft("A", "")).await.unwrap();

    client.login("c@d.com", "password1").await.unwrap();
    assert!(client.list_notes().await.unwrap().is_empty());

    let error = client.get_note(note_a.id).await.unwrap_err();
    assert_eq!(error.note_id(), Some(note_a.id));
}

#[tokio::test]
async fn token_written_to_shared_store_is_used_by_next_call() {
    let (client, _) = signed_in_client("a@b.com").await;
    let other = NotesClient::new(client.base_url(), MemoryTokenStore::new()).unwrap();

    assert!(matches!(
        other.list_notes().await,
        Err(Error::NotAuthenticated)
    ));
    let store = MemoryTokenStore::with_token(client.token().unwrap());
    let other = NotesClient::new(client.base_url(), store).unwrap();
    assert!(other.list_notes().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_token_is_rejected_by_service() {
    let (url, _) = spawn_fake_service().await;
    let store = MemoryTokenStore::with_token(SessionToken::new("forged").unwrap());
    let client = NotesClient::new(&url, store.clone()).unwrap();

    let error = client.list_notes().await.unwrap_err();
    assert_eq!(error.operation(), Some(Operation::ListNotes));
    assert_eq!(error.status().map(|status| status.as_u16()), Some(401));
    assert!(store.load_token().unwrap().is_some());
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let (client, shared) = signed_in_client("a@b.com").await;

    let first = draft("one", "");
    let second = draft("two", "");
    let third = draft("three", "");
    let (a, b, c) = tokio::join!(
        client.create_note(&first),
        client.create_note(&second),
        client.create_note(&third),
    );
    let mut ids = vec![a.unwrap().id, b.unwrap().id, c.unwrap().id];
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 3);
    assert_eq!(shared.lock().unwrap().notes.len(), 3);
}
