//! Notes HTTP Routes
//!
//! CRUD and list endpoints for notes. Each handler translates the request
//! into one service call; failures become responses through `ApiError`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::errors::{ApiResult, ErrorResponse};
use super::response::{ListResponse, NoteResponse};
use crate::model::{NoteId, NoteInput, Page, MAX_PAGE_LIMIT};
use crate::openapi::{int32_range, int64, EndpointDoc, HttpMethod};
use crate::service::NoteService;

pub const NOTES_PATH: &str = "/notes";

const TAG: &str = "notes";

/// State shared by the notes handlers
pub struct NotesState {
    pub service: NoteService,
}

impl NotesState {
    pub fn new(service: NoteService) -> Self {
        Self { service }
    }
}

/// Create notes routes
pub fn notes_routes(state: Arc<NotesState>) -> Router {
    Router::new()
        .route(NOTES_PATH, get(list_notes_handler).post(create_note_handler))
        .route(
            "/notes/:note_id",
            get(get_note_handler)
                .put(update_note_handler)
                .delete(delete_note_handler),
        )
        .with_state(state)
}

/// Contracts of the routes mounted by `notes_routes`
pub fn notes_endpoints() -> Vec<EndpointDoc> {
    vec![
        EndpointDoc::new(HttpMethod::Get, "/notes", "listNotes")
            .summary("List notes in creation order.")
            .tag(TAG)
            .query_param(
                "limit",
                "Maximum number of notes to return",
                int32_range(1, MAX_PAGE_LIMIT),
            )
            .query_param("offset", "Number of notes to skip", int64())
            .json_response::<ListResponse<NoteResponse>>(200, "Notes found.")
            .json_response::<ErrorResponse>(400, "Invalid paging parameters."),
        EndpointDoc::new(HttpMethod::Get, "/notes/{noteId}", "getNote")
            .summary("Get a single note.")
            .tag(TAG)
            .path_param("noteId", "Note ID", int64())
            .json_response::<NoteResponse>(200, "Note found.")
            .json_response::<ErrorResponse>(400, "Note ID is not an integer.")
            .json_response::<ErrorResponse>(404, "Note not found."),
        EndpointDoc::new(HttpMethod::Post, "/notes", "createNote")
            .summary("Create a note.")
            .tag(TAG)
            .request_body::<NoteInput>()
            .json_response::<NoteResponse>(201, "Note created.")
            .with_header("Location", "URL of the created note")
            .json_response::<ErrorResponse>(400, "Note validation has failed."),
        EndpointDoc::new(HttpMethod::Put, "/notes/{noteId}", "updateNote")
            .summary("Replace the title and body of a note.")
            .tag(TAG)
            .path_param("noteId", "Note ID", int64())
            .request_body::<NoteInput>()
            .json_response::<NoteResponse>(200, "Note updated.")
            .json_response::<ErrorResponse>(400, "Note validation has failed.")
            .json_response::<ErrorResponse>(404, "Note not found."),
        EndpointDoc::new(HttpMethod::Delete, "/notes/{noteId}", "deleteNote")
            .summary("Delete a note.")
            .tag(TAG)
            .path_param("noteId", "Note ID", int64())
            .response(204, "Note deleted.")
            .json_response::<ErrorResponse>(400, "Note ID is not an integer.")
            .json_response::<ErrorResponse>(404, "Note not found."),
    ]
    .into_iter()
    .map(with_storage_failures)
    .collect()
}

/// Storage failures any notes endpoint can surface
fn with_storage_failures(doc: EndpointDoc) -> EndpointDoc {
    let doc = if matches!(doc.method, HttpMethod::Post | HttpMethod::Put) {
        doc.json_response::<ErrorResponse>(409, "Request conflicts with stored data.")
    } else {
        doc
    };
    doc.json_response::<ErrorResponse>(500, "Internal server error.")
        .json_response::<ErrorResponse>(503, "Database unavailable.")
}

async fn list_notes_handler(
    State(state): State<Arc<NotesState>>,
    page: Result<Query<Page>, QueryRejection>,
) -> ApiResult<Json<ListResponse<NoteResponse>>> {
    let Query(page) = page?;
    let notes = state.service.list(page).await?;
    let data = notes.into_iter().map(NoteResponse::from).collect();
    Ok(Json(ListResponse::new(data, page.limit, page.offset)))
}

async fn get_note_handler(
    State(state): State<Arc<NotesState>>,
    note_id: Result<Path<NoteId>, PathRejection>,
) -> ApiResult<Json<NoteResponse>> {
    let Path(note_id) = note_id?;
    let note = state.service.get(note_id).await?;
    Ok(Json(note.into()))
}

async fn create_note_handler(
    State(state): State<Arc<NotesState>>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let note = state.service.create(&input).await?;
    let location = format!("{}/{}", NOTES_PATH, note.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(NoteResponse::from(note)),
    ))
}

async fn update_note_handler(
    State(state): State<Arc<NotesState>>,
    note_id: Result<Path<NoteId>, PathRejection>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> ApiResult<Json<NoteResponse>> {
    let Path(note_id) = note_id?;
    let Json(input) = payload?;
    let note = state.service.update(note_id, &input).await?;
    Ok(Json(note.into()))
}

async fn delete_note_handler(
    State(state): State<Arc<NotesState>>,
    note_id: Result<Path<NoteId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(note_id) = note_id?;
    state.service.delete(note_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
