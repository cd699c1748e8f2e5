//! Process-local store behind the mock API

use shared::models::{
    Category, FieldDefinition, FieldType, RawAsset, Submission, Template, TemplateSummary, Ticket,
    TicketStatus,
};
use shared::util::now_rfc3339;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Registered user; also listed as a technician
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Debug, Default)]
pub struct Store {
    pub users: Vec<User>,
    /// token -> user id
    pub tokens: HashMap<String, i64>,
    pub templates: BTreeMap<i64, Template>,
    pub submissions: Vec<Submission>,
    pub tickets: BTreeMap<i64, Ticket>,
    pub categories: Vec<Category>,
    pub assets: Vec<RawAsset>,
    next_id: i64,
}

impl Store {
    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn user_by_token(&self, token: &str) -> Option<&User> {
        let id = self.tokens.get(token)?;
        self.users.iter().find(|u| u.id == *id)
    }

    pub fn issue_token(&mut self, user_id: i64) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), user_id);
        token
    }

    pub fn template_summaries(&self) -> Vec<TemplateSummary> {
        self.templates.values().map(TemplateSummary::from).collect()
    }

    pub fn insert_template(&mut self, name: String, fields: Vec<FieldDefinition>) -> Template {
        let id = self.next_id();
        let now = now_rfc3339();
        let template = Template {
            id,
            name,
            fields,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        };
        self.templates.insert(id, template.clone());
        template
    }

    /// New ticket with no replies, status `abierto`
    pub fn open_ticket(&mut self, title: &str, description: &str) -> Ticket {
        let id = self.next_id();
        let ticket = Ticket {
            id,
            title: title.to_string(),
            description: description.to_string(),
            status: TicketStatus::Abierto,
            responses: Vec::new(),
        };
        self.tickets.insert(id, ticket.clone());
        ticket
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with a demo template, a ticket, categories and inventory records
    pub fn seeded() -> Self {
        let mut store = Store::default();

        store.insert_template(
            "Solicitud de soporte".to_string(),
            vec![
                FieldDefinition::new("nombre", FieldType::Text).with_label("Nombre"),
                FieldDefinition::new("correo", FieldType::Email).with_label("Correo"),
                FieldDefinition::new("prioridad", FieldType::Select)
                    .with_label("Prioridad")
                    .with_default("Media")
                    .with_options(vec!["Alta".into(), "Media".into(), "Baja".into()]),
                FieldDefinition::new("equipos", FieldType::Number)
                    .with_label("Equipos afectados")
                    .with_default("1"),
            ],
        );

        store.open_ticket(
            "Impresora sin tóner",
            "La impresora del segundo piso no imprime",
        );

        for nombre in ["Hardware", "Software", "Redes"] {
            let id = store.next_id();
            store.categories.push(Category {
                id,
                nombre: nombre.to_string(),
                created_at: Some(now_rfc3339()),
            });
        }

        store.assets = vec![
            RawAsset {
                id_activo: Some("1".into()),
                nombre_activo: Some("PC Recepción".into()),
                codigo: Some("PC-001".into()),
                id_tipo_pc: Some("2".into()),
                estado: Some("Activo".into()),
                marca: Some("Lenovo".into()),
                ..Default::default()
            },
            RawAsset {
                id_activo: Some("2".into()),
                codigo: Some("LT-014".into()),
                id_tipo_pc: Some("1".into()),
                fecha_ultimo_mantenimiento: Some("2025-03-02".into()),
                ..Default::default()
            },
        ];

        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}
