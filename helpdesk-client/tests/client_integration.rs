//! End-to-end tests against the mock backend over real HTTP.

use helpdesk_client::forms::CREATED_AT_COLUMN;
use helpdesk_client::models::{FieldChanges, FieldType, TicketStatus};
use helpdesk_client::{
    ClientConfig, ClientError, DirectoryApi, FormBuilder, FormRenderer, HelpdeskClient,
    InventoryApi, LoadState, SubmissionApi, SubmissionViewer, TemplateApi, TemplateEditor,
    RegisterRequest, WorkOrderEditor,
};
use helpdesk_mock::{AppState, router};

async fn spawn_mock(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url)
        .with_timeout(5)
        .with_form_base_url("http://forms.test")
}

#[tokio::test]
async fn test_build_fill_and_pivot() {
    let base = spawn_mock(AppState::new()).await;
    let client = HelpdeskClient::new(config(&base)).unwrap();

    // Builder
    let mut builder = FormBuilder::new("Intake");
    let name = builder.add_field(FieldType::Text);
    builder.update_field(&name, FieldChanges::label("Name"));
    let prio = builder.add_field(FieldType::Select);
    builder.update_field(&prio, FieldChanges::label("Priority"));
    builder.set_options_text(&prio, "Alta, Baja");
    builder.update_field(&prio, FieldChanges::default_value("Baja"));

    let saved = builder.save(&client, &client.config().form_base_url).await.unwrap();
    assert_eq!(
        saved.link,
        format!("http://forms.test/ver-formulario?id={}", saved.id)
    );

    // Renderer: untouched submit yields defaults in field order
    let mut renderer = FormRenderer::new();
    renderer.load(&client, saved.id).await.unwrap();
    assert!(matches!(renderer.state(), LoadState::Ready(_)));
    let first = renderer.submit(&client).await.unwrap();
    let labels: Vec<&str> = first.submission.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["Name", "Priority"]);
    assert_eq!(first.submission[1].value, "Baja");

    // values reset after a successful submit
    assert_eq!(renderer.value(&prio), Some(""));

    renderer.set_value(&name, "Alice");
    renderer.submit(&client).await.unwrap();

    // Viewer
    let viewer = SubmissionViewer::load(&client, saved.id).await.unwrap();
    let table = viewer.table();
    assert_eq!(table.columns(), ["Name", "Priority", CREATED_AT_COLUMN]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.cell(1, "Name"), Some("Alice"));
    assert_eq!(table.cell(1, "Priority"), Some(""));
    assert!(!table.rows[0].created_at.is_empty());
}

#[tokio::test]
async fn test_editor_replaces_template() {
    let base = spawn_mock(AppState::seeded()).await;
    let client = HelpdeskClient::new(config(&base)).unwrap();

    let summaries = client.list_templates().await.unwrap();
    let id = summaries[0].id;

    let mut editor = TemplateEditor::load(&client, id).await.unwrap();
    let original_ids: Vec<String> = editor.fields().iter().map(|f| f.id.clone()).collect();
    editor.set_name("Solicitud v2");
    editor.remove_field(&original_ids[0]);
    let added = editor.add_field(FieldType::Number);
    editor.save(&client).await.unwrap();

    let stored = client.get_template(id).await.unwrap();
    assert_eq!(stored.name, "Solicitud v2");
    assert_eq!(stored.fields.len(), original_ids.len());
    assert_eq!(stored.fields.last().unwrap().id, added);
    assert!(stored.field(&original_ids[0]).is_none());
}

#[tokio::test]
async fn test_auth_session_lifecycle() {
    let base = spawn_mock(AppState::seeded()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut client = HelpdeskClient::new(config(&base).with_data_dir(dir.path())).unwrap();

    // technicians need a session
    assert!(matches!(
        client.technicians().await,
        Err(ClientError::NotAuthenticated)
    ));

    // mismatching confirmation never reaches the server
    let bad = RegisterRequest::from_parts("Luis", "Pérez", "luis@x.co", "secret123", "secret124");
    assert!(matches!(
        client.register(&bad).await,
        Err(ClientError::PasswordMismatch)
    ));

    let req = RegisterRequest::from_parts("Luis", "Pérez", "luis@x.co", "secret123", "secret123");
    let session = client.register(&req).await.unwrap();
    assert_eq!(session.user.name, "Luis Pérez");
    assert!(client.session_store().unwrap().path().exists());

    let techs = client.technicians().await.unwrap();
    assert_eq!(techs.len(), 1);

    // a second client picks the session up from disk
    let mut restored = HelpdeskClient::new(config(&base).with_data_dir(dir.path())).unwrap();
    assert!(restored.restore_session().unwrap());
    assert_eq!(restored.session().unwrap().email(), "luis@x.co");
    assert_eq!(restored.technicians().await.unwrap().len(), 1);

    restored.logout().unwrap();
    assert!(!restored.is_authenticated());
    assert!(!dir.path().join("auth/session.json").exists());

    // wrong password
    let err = client.login("luis@x.co", "nope").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert!(!err.is_retryable());

    client.login("luis@x.co", "secret123").await.unwrap();
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_work_order_update() {
    let base = spawn_mock(AppState::seeded()).await;
    let client = HelpdeskClient::new(config(&base)).unwrap();
    let id = client.list_templates().await.unwrap()[0].id;

    let mut renderer = FormRenderer::new();
    renderer.load(&client, id).await.unwrap();
    renderer.set_value("nombre", "Alice");
    let submission = renderer.submit(&client).await.unwrap();

    let mut editor = WorkOrderEditor::new(&submission);
    editor
        .set_tecnico("Luis")
        .set_status(TicketStatus::EnProceso)
        .set_tipo_mantenimiento("correctivo");
    let updated = editor.save(&client).await.unwrap();
    assert_eq!(updated.work_order.tecnico.as_deref(), Some("Luis"));
    assert!(!editor.is_dirty());

    // a second patch keeps earlier values
    editor.set_status("cerrado");
    let updated = editor.save(&client).await.unwrap();
    assert_eq!(updated.work_order.status, Some(TicketStatus::Cerrado));
    assert_eq!(updated.work_order.tecnico.as_deref(), Some("Luis"));

    let listed = client.submissions_by_template(id).await.unwrap();
    assert_eq!(
        listed[0].work_order.tipo_mantenimiento.as_deref(),
        Some("correctivo")
    );
}

#[tokio::test]
async fn test_errors_and_failed_load() {
    let base = spawn_mock(AppState::new()).await;
    let client = HelpdeskClient::new(config(&base)).unwrap();

    let mut renderer = FormRenderer::new();
    let err = renderer.load(&client, 404).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert!(matches!(renderer.state(), LoadState::Failed(_)));
    assert!(matches!(
        renderer.submit(&client).await,
        Err(ClientError::InvalidState(_))
    ));

    assert!(client.list_templates().await.unwrap().is_empty());
    assert!(client.categories().await.unwrap().is_empty());

    // no inventory service configured
    assert!(matches!(client.assets().await, Err(ClientError::Config(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_retryable() {
    // bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HelpdeskClient::new(config(&format!("http://{}", addr))).unwrap();
    let err = client.list_templates().await.unwrap_err();
    assert!(err.is_retryable(), "unexpected: {err:?}");
}

#[tokio::test]
async fn test_inventory_assets() {
    let base = spawn_mock(AppState::seeded()).await;
    let client = HelpdeskClient::new(
        config(&base)
            .with_inventory_url(base.clone())
            .with_asset_edit_url("http://inv.test/editar/computador/"),
    )
    .unwrap();

    let assets = client.assets().await.unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].pc_type, "Escritorio");
    assert_eq!(assets[0].edit_url, "http://inv.test/editar/computador/PC-001");
    assert_eq!(assets[1].name, "Sin nombre");
    assert_eq!(assets[1].next_maintenance, "No programado");
}
