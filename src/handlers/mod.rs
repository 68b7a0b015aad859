use std::sync::Arc;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::{CompanyService, QuotationService};

pub mod companies;
pub mod quotations;

/// Service instances shared by all request handlers.
#[derive(Clone)]
pub struct AppServices {
    pub quotations: Arc<QuotationService>,
    pub companies: Arc<CompanyService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            quotations: Arc::new(QuotationService::new(db.clone(), event_sender.clone())),
            companies: Arc::new(CompanyService::new(db, event_sender)),
        }
    }
}
