use crate::extract::{AppJson, CurrentUser};
use crate::state::{AppState, User};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, Uri},
    routing::{get, patch, post},
};
use shared::client::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Category, InventoryQuery, InventoryResponse, Submission, SubmissionPayload, Technician,
    Template, TemplatePayload, TemplateSummary, Ticket, TicketReply, TicketResponse, WorkOrder,
};
use shared::util::now_rfc3339;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

const MIN_PASSWORD_LEN: usize = 6;

fn hash_password(password: &str) -> AppResult<String> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Password hash error: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: Some(user.id),
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

// ── Auth ──

async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    if req.name.trim().is_empty() {
        return Err(AppError::required("name"));
    }
    if req.email.trim().is_empty() {
        return Err(AppError::required("email"));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort)
            .with_detail("min_length", MIN_PASSWORD_LEN));
    }
    if !req.passwords_match() {
        return Err(AppError::new(ErrorCode::PasswordMismatch));
    }

    let password_hash = hash_password(&req.password)?;
    let mut store = state.store.write().await;
    if store.user_by_email(&req.email).is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).with_detail("email", req.email));
    }
    let id = store.next_id();
    let user = User {
        id,
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        password_hash,
        created_at: now_rfc3339(),
    };
    let info = user_info(&user);
    store.users.push(user);
    let token = store.issue_token(id);

    tracing::info!(user_id = id, email = %info.email, "User registered");
    Ok(Json(AuthResponse { token, user: info }))
}

async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let mut store = state.store.write().await;
    let user = store
        .user_by_email(&req.email)
        .filter(|u| verify_password(&req.password, &u.password_hash))
        .map(user_info)
        .ok_or_else(AppError::invalid_credentials)?;
    let token = store.issue_token(user.id.unwrap_or_default());

    tracing::info!(email = %user.email, "Login successful");
    Ok(Json(AuthResponse { token, user }))
}

// ── Templates ──

async fn list_templates(State(state): State<AppState>) -> Json<Vec<TemplateSummary>> {
    Json(state.store.read().await.template_summaries())
}

async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Template>> {
    let store = state.store.read().await;
    store
        .templates
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::template_not_found(id))
}

async fn create_template(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TemplatePayload>,
) -> (StatusCode, Json<Template>) {
    let template = state
        .store
        .write()
        .await
        .insert_template(payload.name, payload.fields);
    tracing::info!(id = template.id, name = %template.name, "Template created");
    (StatusCode::CREATED, Json(template))
}

async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<TemplatePayload>,
) -> AppResult<Json<Template>> {
    let mut store = state.store.write().await;
    let template = store
        .templates
        .get_mut(&id)
        .ok_or_else(|| AppError::template_not_found(id))?;
    template.name = payload.name;
    template.fields = payload.fields;
    template.updated_at = Some(now_rfc3339());
    tracing::info!(id, "Template updated");
    Ok(Json(template.clone()))
}

// ── Submissions ──

async fn submissions_by_template(
    State(state): State<AppState>,
    Path(template_id): Path<i64>,
) -> AppResult<Json<Vec<Submission>>> {
    let store = state.store.read().await;
    if !store.templates.contains_key(&template_id) {
        return Err(AppError::template_not_found(template_id));
    }
    Ok(Json(
        store
            .submissions
            .iter()
            .filter(|s| s.ticket_template_id == template_id)
            .cloned()
            .collect(),
    ))
}

async fn create_submission(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmissionPayload>,
) -> AppResult<(StatusCode, Json<Submission>)> {
    let mut store = state.store.write().await;
    if !store.templates.contains_key(&payload.ticket_template_id) {
        return Err(AppError::template_not_found(payload.ticket_template_id));
    }
    let id = store.next_id();
    let now = now_rfc3339();
    let submission = Submission {
        id,
        ticket_template_id: payload.ticket_template_id,
        submission: payload.submission,
        created_at: Some(now.clone()),
        updated_at: Some(now),
        work_order: WorkOrder::default(),
    };
    store.submissions.push(submission.clone());
    tracing::info!(id, template_id = submission.ticket_template_id, "Submission stored");
    Ok((StatusCode::CREATED, Json(submission)))
}

async fn update_work_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(patch): AppJson<WorkOrder>,
) -> AppResult<Json<Submission>> {
    let mut store = state.store.write().await;
    let submission = store
        .submissions
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::submission_not_found(id))?;
    submission.work_order.merge(patch);
    submission.updated_at = Some(now_rfc3339());
    Ok(Json(submission.clone()))
}

// ── Tickets ──

async fn get_ticket(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Ticket>> {
    let store = state.store.read().await;
    store
        .tickets
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::ticket_not_found(id))
}

async fn reply_to_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(reply): AppJson<TicketReply>,
) -> AppResult<(StatusCode, Json<TicketResponse>)> {
    if reply.message.trim().is_empty() {
        return Err(AppError::required("message"));
    }
    let mut store = state.store.write().await;
    let response_id = store.next_id();
    let ticket = store
        .tickets
        .get_mut(&id)
        .ok_or_else(|| AppError::ticket_not_found(id))?;
    let response = TicketResponse {
        id: response_id,
        message: reply.message,
        created_at: Some(now_rfc3339()),
    };
    ticket.responses.push(response.clone());
    tracing::info!(ticket_id = id, response_id = response.id, "Ticket reply stored");
    Ok((StatusCode::CREATED, Json(response)))
}

// ── Directory ──

async fn technicians(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Technician>>> {
    tracing::debug!(user_id = user.id, "Technicians requested");
    let store = state.store.read().await;
    Ok(Json(
        store
            .users
            .iter()
            .map(|u| Technician {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                profile_photo_url: None,
                created_at: Some(u.created_at.clone()),
            })
            .collect(),
    ))
}

async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.store.read().await.categories.clone())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::new(ErrorCode::NotFound).with_detail("path", uri.path())
}

// ── Inventory ──

async fn inventory(
    State(state): State<AppState>,
    AppJson(query): AppJson<InventoryQuery>,
) -> Json<InventoryResponse> {
    tracing::debug!(user_id = ?query.id, "Inventory requested");
    Json(InventoryResponse {
        activo: state.store.read().await.assets.clone(),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/{id}", get(get_template).put(update_template))
        .route("/submissions", post(create_submission))
        .route(
            "/submissions/by-template/{id}",
            get(submissions_by_template),
        )
        .route("/ticket-submissions/{id}", patch(update_work_order))
        .route("/get-tecnicos", get(technicians))
        .route("/categorias", get(categories))
        .route("/tabla", post(inventory))
        .route("/tickets/{id}", get(get_ticket))
        .route("/tickets/{id}/responses", post(reply_to_ticket))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
