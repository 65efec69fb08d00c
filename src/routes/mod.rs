use actix_web::web::{scope, ServiceConfig};
use actix_web::Scope;
use acknowledgements::{acknowledge_document, get_acceptance_status, remind_pending};
use approvals::{approve_document, bulk_approve, bulk_reject, reject_document, request_approval, resend_notification};
use departments::{create_department, get_departments};
use documents::{
    delete_document, get_audit_trail, get_document_stats, get_suggestions, list_documents, update_document,
    view_document,
};
use uploads::{upload_documents, upload_file};
use users::{current_user, list_users, login};
mod acknowledgements;
mod approvals;
mod departments;
mod documents;
mod health_check;
mod uploads;
mod users;

use crate::routes::health_check::*;

fn util_routes() -> Scope {
    scope("").service(health_check)
}

fn users_routes() -> Scope {
    scope("users").service(list_users)
}

fn session_routes() -> Scope {
    scope("session").service(login).service(current_user)
}

// Literal segments go before `/{document_id}` so they are not taken as ids.
fn documents_routes() -> Scope {
    scope("documents")
        .service(list_documents)
        .service(upload_documents)
        .service(get_document_stats)
        .service(get_suggestions)
        .service(upload_file)
        // bulk workflow routes
        .service(bulk_approve)
        .service(bulk_reject)
        .service(request_approval)
        .service(resend_notification)
        // single document routes
        .service(view_document)
        .service(update_document)
        .service(delete_document)
        .service(approve_document)
        .service(reject_document)
        .service(get_audit_trail)
        .service(acknowledge_document)
        .service(get_acceptance_status)
        .service(remind_pending)
}

fn departments_routes() -> Scope {
    scope("departments")
        .service(get_departments)
        .service(create_department)
}

pub fn dms_routes(conf: &mut ServiceConfig) {
    conf.service(
        scope("api/v1")
            .service(users_routes())
            .service(session_routes())
            .service(documents_routes())
            .service(departments_routes())
            .service(util_routes()),
    );
}
