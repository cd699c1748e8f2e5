//! The same client driven through the in-process oneshot transport.

use helpdesk_client::models::{FieldChanges, FieldType, StatusBadge, SubmissionEntry};
use helpdesk_client::{
    ClientConfig, ClientError, DirectoryApi, FormBuilder, FormRenderer, HelpdeskClient, LoadState,
    PivotTable, SubmissionApi, TemplateApi, TicketApi,
};
use helpdesk_mock::{AppState, router};

fn client() -> HelpdeskClient<helpdesk_client::OneshotHttpClient> {
    HelpdeskClient::in_process(router(AppState::new()), ClientConfig::default()).unwrap()
}

#[tokio::test]
async fn test_intake_name_alice() {
    let client = client();

    let mut builder = FormBuilder::new("Intake");
    let id = builder.add_field(FieldType::Text);
    builder.update_field(&id, FieldChanges::label("Name"));
    let saved = builder.save(&client, "http://forms").await.unwrap();

    let mut renderer = FormRenderer::new();
    renderer.load(&client, saved.id).await.unwrap();
    renderer.set_value(&id, "Alice");
    let submission = renderer.submit(&client).await.unwrap();

    assert_eq!(submission.submission, vec![SubmissionEntry::new("Name", "Alice")]);
    assert_eq!(submission.ticket_template_id, saved.id);
}

#[tokio::test]
async fn test_failed_submit_keeps_values() {
    let state = AppState::new();
    let client =
        HelpdeskClient::in_process(router(state.clone()), ClientConfig::default()).unwrap();

    let mut builder = FormBuilder::new("Intake");
    let id = builder.add_field(FieldType::Text);
    builder.update_field(&id, FieldChanges::label("Name"));
    let saved = builder.save(&client, "http://forms").await.unwrap();

    let mut renderer = FormRenderer::new();
    renderer.load(&client, saved.id).await.unwrap();
    renderer.set_value(&id, "Alice");

    // template deleted server-side after the form was loaded
    state.store.write().await.templates.remove(&saved.id);

    let err = renderer.submit(&client).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(renderer.value(&id), Some("Alice"));
    assert!(matches!(renderer.state(), LoadState::Ready(t) if t.id == saved.id));
}

#[tokio::test]
async fn test_pivot_union_across_template_versions() {
    let client = client();

    let mut builder = FormBuilder::new("Survey");
    let a = builder.add_field(FieldType::Text);
    builder.update_field(&a, FieldChanges::label("A"));
    let b = builder.add_field(FieldType::Text);
    builder.update_field(&b, FieldChanges::label("B"));
    let saved = builder.save(&client, "http://forms").await.unwrap();

    let mut renderer = FormRenderer::new();
    renderer.load(&client, saved.id).await.unwrap();
    renderer.set_value(&a, "1");
    renderer.set_value(&b, "2");
    renderer.submit(&client).await.unwrap();

    // template edited: A removed, C added
    let mut edited = builder.clone();
    edited.remove_field(&a);
    let c = edited.add_field(FieldType::Text);
    edited.update_field(&c, FieldChanges::label("C"));
    client
        .update_template(saved.id, &edited.payload())
        .await
        .unwrap();

    renderer.load(&client, saved.id).await.unwrap();
    renderer.set_value(&b, "3");
    renderer.set_value(&c, "4");
    renderer.submit(&client).await.unwrap();

    let submissions = client.submissions_by_template(saved.id).await.unwrap();
    let table = PivotTable::from_submissions(&submissions);
    assert_eq!(table.columns(), ["A", "B", "C", "Fecha de creación"]);
    assert_eq!(table.rows[0].cells, ["1", "2", ""]);
    assert_eq!(table.rows[1].cells, ["", "3", "4"]);
}

#[tokio::test]
async fn test_in_process_login_sets_bearer() {
    let mut client = client();
    let req = helpdesk_client::RegisterRequest::from_parts("Ana", "Ruiz", "ana@x.co", "secret1", "secret1");
    client.register(&req).await.unwrap();
    client.logout().unwrap();

    client.login("ana@x.co", "secret1").await.unwrap();
    let techs = client.technicians().await.unwrap();
    assert_eq!(techs[0].name, "Ana Ruiz");
}

#[tokio::test]
async fn test_ticket_reply_round() {
    let state = AppState::new();
    let ticket = state
        .store
        .write()
        .await
        .open_ticket("Impresora", "No imprime");
    let client =
        HelpdeskClient::in_process(router(state.clone()), ClientConfig::default()).unwrap();

    let detail = client.ticket(ticket.id).await.unwrap();
    assert_eq!(detail.title, "Impresora");
    assert_eq!(detail.status.badge(), StatusBadge::Open);
    assert!(detail.responses.is_empty());

    let reply = client.reply_to_ticket(ticket.id, "En camino").await.unwrap();
    assert_eq!(reply.message, "En camino");
    assert!(reply.created_at.is_some());

    let detail = client.ticket(ticket.id).await.unwrap();
    assert_eq!(detail.responses, vec![reply]);

    let err = client.ticket(4242).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(ref m) if m == "Ticket not found"));
}

#[tokio::test]
async fn test_blank_ticket_reply_not_sent() {
    let state = AppState::new();
    let ticket = state.store.write().await.open_ticket("Red", "");
    let client =
        HelpdeskClient::in_process(router(state.clone()), ClientConfig::default()).unwrap();

    // unknown id: a request would have answered NotFound
    let err = client.reply_to_ticket(4242, "  \n ").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let err = client.reply_to_ticket(ticket.id, "").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(state.store.read().await.tickets[&ticket.id].responses.is_empty());
}
