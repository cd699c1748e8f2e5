//! Subcommand handlers. Results go to stdout, diagnostics to the log.

use anyhow::{Context, bail};
use helpdesk_client::models::{FieldChanges, FieldDefinition, InputKind, Template, Ticket};
use helpdesk_client::{
    Advisory, DirectoryApi, FormBuilder, FormRenderer, HelpdeskClient, InventoryApi,
    RegisterRequest, SubmissionViewer, TemplateApi, TemplateEditor, TicketApi, WorkOrderEditor,
};

use crate::cli::{Command, TemplateCommand, WorkOrderArgs};
use crate::field_spec::{FieldSpec, parse_assignment, parse_move};

pub async fn run(client: &mut HelpdeskClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let session = client.login(&email, &password).await?;
            println!("Signed in as {} <{}>", session.user.name, session.email());
        }
        Command::Register {
            first_name,
            last_name,
            email,
            password,
            confirm,
        } => {
            let req = RegisterRequest::from_parts(&first_name, &last_name, &email, &password, &confirm);
            let session = client.register(&req).await?;
            println!("Registered {} <{}>", session.user.name, session.email());
        }
        Command::Logout => {
            client.logout()?;
            println!("Signed out");
        }
        Command::Whoami => match client.session() {
            Some(session) => println!("{} <{}>", session.user.name, session.email()),
            None => println!("Not signed in"),
        },
        Command::Templates(cmd) => templates(client, cmd).await?,
        Command::Fill {
            template_id,
            values,
        } => fill(client, template_id, &values).await?,
        Command::Submissions { template_id, json } => {
            let viewer = SubmissionViewer::load(&*client, template_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(viewer.submissions())?);
                return Ok(());
            }
            let table = viewer.table();
            if table.is_empty() {
                println!("No submissions for template {}", template_id);
                return Ok(());
            }
            print!("{}", table.render_text());
            for dup in &table.duplicates {
                tracing::warn!(
                    submission_id = dup.submission_id,
                    label = %dup.label,
                    occurrences = dup.occurrences,
                    "Label repeated in submission, showing the first value"
                );
            }
        }
        Command::WorkOrder(args) => work_order(client, args).await?,
        Command::Ticket { id, reply } => {
            if let Some(message) = reply {
                client.reply_to_ticket(id, &message).await?;
            }
            let ticket = client.ticket(id).await?;
            print!("{}", ticket_text(&ticket));
        }
        Command::Tecnicos => {
            for tech in client.technicians().await? {
                println!("{:>4}  {}  <{}>", tech.id, tech.name, tech.email);
            }
        }
        Command::Categorias => {
            for category in client.categories().await? {
                println!("{:>4}  {}", category.id, category.nombre);
            }
        }
        Command::Assets => {
            for asset in client.assets().await? {
                println!(
                    "{}  {}  [{}]  {}  ultimo: {}  proximo: {}",
                    asset.code,
                    asset.name,
                    asset.pc_type,
                    asset.state,
                    asset.last_maintenance,
                    asset.next_maintenance
                );
                println!("      {}", asset.edit_url);
            }
        }
    }
    Ok(())
}

async fn templates(client: &HelpdeskClient, cmd: TemplateCommand) -> anyhow::Result<()> {
    match cmd {
        TemplateCommand::List => {
            for summary in client.list_templates().await? {
                println!(
                    "{:>4}  {}  {}",
                    summary.id,
                    summary.name,
                    client.form_link(summary.id)
                );
            }
        }
        TemplateCommand::Show { id } => {
            let template = client.get_template(id).await?;
            print_template(&template);
            println!("link: {}", client.form_link(id));
        }
        TemplateCommand::Create {
            name,
            fields,
            preview,
        } => {
            let mut builder = FormBuilder::new(name);
            for spec in &fields {
                add_from_spec(&mut builder, spec)?;
            }
            if preview {
                println!("{}", builder.preview()?);
                return Ok(());
            }
            let saved = builder
                .save(client, &client.config().form_base_url)
                .await?;
            println!("Created template {}", saved.id);
            println!("{}", saved.link);
        }
        TemplateCommand::Edit {
            id,
            name,
            add,
            remove,
            moves,
            labels,
        } => {
            let mut editor = TemplateEditor::load(client, id).await?;
            if let Some(name) = name {
                editor.set_name(name);
            }
            for spec in &add {
                add_from_spec(&mut editor, spec)?;
            }
            for field_id in &remove {
                if !editor.remove_field(field_id) {
                    bail!("template {} has no field '{}'", id, field_id);
                }
            }
            for arg in &moves {
                let (field_id, index) = parse_move(arg)?;
                if editor.field(&field_id).is_none() {
                    bail!("template {} has no field '{}'", id, field_id);
                }
                editor.move_field(&field_id, index);
            }
            for arg in &labels {
                let (field_id, label) = parse_assignment(arg)?;
                if !editor.update_field(&field_id, FieldChanges::label(label)) {
                    bail!("template {} has no field '{}'", id, field_id);
                }
            }
            editor.save(client).await?;
            println!("Updated template {}", id);
        }
    }
    Ok(())
}

fn add_from_spec(builder: &mut FormBuilder, spec: &str) -> anyhow::Result<String> {
    let spec = FieldSpec::parse(spec)?;
    let id = builder.add_field(spec.field_type);
    builder.update_field(&id, spec.changes());
    Ok(id)
}

fn print_template(template: &Template) {
    println!("{} (#{})", template.name, template.id);
    for line in field_lines(template) {
        println!("{}", line);
    }
}

fn field_lines(template: &Template) -> Vec<String> {
    template
        .fields
        .iter()
        .map(|field| {
            let mut line = format!("  {}  {:<6}  {}", field.id, field.field_type().as_str(), field.label);
            if !field.default_value.is_empty() {
                line.push_str(&format!("  [default: {}]", field.default_value));
            }
            if let Some(hint) = value_hint(field) {
                line.push_str("  ");
                line.push_str(&hint);
            }
            line
        })
        .collect()
}

/// What `fill --set` expects for a field
fn value_hint(field: &FieldDefinition) -> Option<String> {
    match field.kind.input_kind() {
        InputKind::Text => None,
        InputKind::Number => Some("<number>".to_string()),
        InputKind::Email => Some("<email>".to_string()),
        InputKind::Choice => Some(format!(
            "{{{}}}",
            field.options().unwrap_or_default().join(", ")
        )),
    }
}

fn ticket_text(ticket: &Ticket) -> String {
    let mut out = format!(
        "Ticket #{}  {} ({})\n{}\n",
        ticket.id,
        ticket.status,
        ticket.status.badge().name(),
        ticket.title
    );
    if !ticket.description.is_empty() {
        out.push_str(&format!("{}\n", ticket.description));
    }
    if ticket.responses.is_empty() {
        out.push_str("No replies yet\n");
    }
    for response in &ticket.responses {
        out.push_str(&format!(
            "  - {}  {}\n",
            response.created_at.as_deref().unwrap_or("-"),
            response.message
        ));
    }
    out
}

/// Field id for a `--set` key: an exact id wins, then the first matching label.
fn resolve_field<'a>(template: &'a Template, key: &'a str) -> &'a str {
    if let Some(field) = template.field(key) {
        return &field.id;
    }
    template
        .fields
        .iter()
        .find(|f| f.label == key)
        .map(|f| f.id.as_str())
        .unwrap_or(key)
}

async fn fill(client: &HelpdeskClient, template_id: i64, values: &[String]) -> anyhow::Result<()> {
    let mut renderer = FormRenderer::new();
    renderer.load(client, template_id).await?;
    let template = renderer
        .template()
        .cloned()
        .context("template did not load")?;

    for arg in values {
        let (key, value) = parse_assignment(arg)?;
        let field_id = resolve_field(&template, &key).to_string();
        renderer.set_value(&field_id, value);
    }

    for advisory in renderer.advisories() {
        match advisory {
            Advisory::NotAnOption { field_id, value } => tracing::warn!(
                field = %template.label_for(&field_id),
                %value,
                "Value is not one of the field's options"
            ),
            Advisory::NotANumber { field_id, value } => {
                tracing::warn!(field = %template.label_for(&field_id), %value, "Value is not a number")
            }
            Advisory::NotAnEmail { field_id, value } => tracing::warn!(
                field = %template.label_for(&field_id),
                %value,
                "Value does not look like an email address"
            ),
        }
    }

    let submission = renderer.submit(client).await?;
    println!("Submitted #{} to {}", submission.id, template.name);
    Ok(())
}

async fn work_order(client: &HelpdeskClient, args: WorkOrderArgs) -> anyhow::Result<()> {
    let mut editor = WorkOrderEditor::for_id(args.submission_id);
    if let Some(tecnico) = args.tecnico {
        editor.set_tecnico(tecnico);
    }
    if let Some(status) = args.status {
        editor.set_status(status.as_str());
    }
    if let Some(serial) = args.serial {
        editor.set_serial(serial);
    }
    if let Some(description) = args.description {
        editor.set_description(description);
    }
    if let Some(tipo) = args.tipo_mantenimiento {
        editor.set_tipo_mantenimiento(tipo);
    }
    if !editor.is_dirty() {
        bail!("nothing to update: pass at least one of --tecnico, --status, --serial, --description, --tipo");
    }

    let updated = editor.save(client).await?;
    let wo = &updated.work_order;
    println!("Submission #{}", updated.id);
    println!("  tecnico:     {}", wo.tecnico.as_deref().unwrap_or("-"));
    println!(
        "  status:      {}",
        wo.status.as_ref().map(|s| s.as_str()).unwrap_or("-")
    );
    println!("  serial:      {}", wo.serial.as_deref().unwrap_or("-"));
    println!("  description: {}", wo.description.as_deref().unwrap_or("-"));
    println!(
        "  tipo:        {}",
        wo.tipo_mantenimiento.as_deref().unwrap_or("-")
    );
    Ok(())
}
