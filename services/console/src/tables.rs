//! Table rendering for list commands.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde_json::Value;

use enrolldesk::catalog::admin::CatalogSpec;
use enrolldesk::domain::{Agent, Course, Enrollment, ScheduleItem, Student};
use enrolldesk::forms::ScheduleAction;

fn base_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

pub fn students(students: &[Student]) -> Table {
    let mut table = base_table(&[
        "Id",
        "Name",
        "Document",
        "Profession",
        "Institution",
        "Academic Rank",
    ]);
    for student in students {
        table.add_row(vec![
            student.id.to_string(),
            student.person.full_name(),
            student.person.document_number.clone(),
            student
                .profession
                .as_ref()
                .map(|entry| entry.label().to_string())
                .unwrap_or_default(),
            student
                .institution
                .as_ref()
                .map(|institution| institution.name.clone())
                .unwrap_or_default(),
            student
                .academic_rank
                .as_ref()
                .map(|entry| entry.label().to_string())
                .unwrap_or_default(),
        ]);
    }
    table
}

pub fn agents(agents: &[Agent]) -> Table {
    let mut table = base_table(&["Id", "Name", "Document", "Email", "Phone"]);
    for agent in agents {
        table.add_row(vec![
            agent.id.to_string(),
            agent.person.full_name(),
            agent.person.document_number.clone(),
            agent.person.email.clone(),
            agent.person.phone.clone(),
        ]);
    }
    table
}

pub fn courses(courses: &[Course]) -> Table {
    let mut table = base_table(&["Id", "Name", "Type", "Modality", "Institutions"]);
    for course in courses {
        let offers: Vec<String> = course
            .institutions
            .iter()
            .map(|offer| {
                format!(
                    "{} ({} months, {:.2})",
                    offer.institution.name, offer.duration_in_months, offer.price
                )
            })
            .collect();
        table.add_row(vec![
            course.id.to_string(),
            course.name.clone(),
            course.course_type.label().to_string(),
            course.modality.label().to_string(),
            offers.join(", "),
        ]);
    }
    table
}

pub fn enrollments(enrollments: &[Enrollment]) -> Table {
    let mut table = base_table(&["Id", "Date", "Student", "Agent", "Course", "Institution"]);
    for enrollment in enrollments {
        table.add_row(vec![
            enrollment.id.to_string(),
            enrollment.enrollment_date.format("%Y-%m-%d").to_string(),
            enrollment.student.person.full_name(),
            enrollment.agent.person.full_name(),
            enrollment.course.name.clone(),
            enrollment.institution.name.clone(),
        ]);
    }
    table
}

pub fn schedule(items: &[ScheduleItem]) -> Table {
    let mut table = base_table(&["Id", "Concept", "Amount", "Due", "Status", "Action"]);
    for item in items {
        let action = match ScheduleAction::for_status(&item.installment_status.status) {
            ScheduleAction::RegisterPayment => "register payment",
            ScheduleAction::ViewDetails => "view details",
        };
        table.add_row(vec![
            item.id.to_string(),
            item.concept_type.label().to_string(),
            format!("{:.2}", item.installment_amount),
            item.installment_due_date.format("%Y-%m-%d").to_string(),
            item.installment_status.status.clone(),
            action.to_string(),
        ]);
    }
    table
}

pub fn catalog_index(specs: &[CatalogSpec]) -> Table {
    let mut table = base_table(&["Key", "Title", "Fields"]);
    for spec in specs {
        let fields: Vec<&str> = spec.fields.iter().map(|field| field.label()).collect();
        table.add_row(vec![
            spec.key.to_string(),
            spec.title.to_string(),
            fields.join(", "),
        ]);
    }
    table
}

pub fn catalog_items(spec: &CatalogSpec, items: &[Value]) -> Table {
    let mut header = vec!["Id"];
    header.extend(spec.fields.iter().map(|field| field.label()));
    let mut table = base_table(&header);
    for item in items {
        let mut row = vec![item
            .get("id")
            .and_then(Value::as_i64)
            .map(|id| id.to_string())
            .unwrap_or_default()];
        for field in spec.fields {
            let cell = match item.get(field.name()) {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Number(number)) => number.to_string(),
                _ => String::new(),
            };
            row.push(cell);
        }
        table.add_row(row);
    }
    table
}
