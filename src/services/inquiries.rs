use super::{RequestHandler, Service, ServiceError};

use crate::models::inquiries::{ChatInquiry, NewInquiry};
use crate::repositories::inquiries::InquiryRepository;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::oneshot;

pub enum InquiryServiceRequest {
    Save {
        inquiry: NewInquiry,
        response: oneshot::Sender<Result<ChatInquiry, ServiceError>>,
    },
    List {
        response: oneshot::Sender<Result<Vec<ChatInquiry>, ServiceError>>,
    },
    Resolve {
        id: String,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
}

#[derive(Clone)]
pub struct InquiryRequestHandler {
    repository: InquiryRepository,
}

impl InquiryRequestHandler {
    pub fn new(sql_conn: SqlitePool) -> Self {
        InquiryRequestHandler {
            repository: InquiryRepository::new(sql_conn),
        }
    }

    async fn save_inquiry(&self, inquiry: NewInquiry) -> Result<ChatInquiry, ServiceError> {
        self.repository
            .save_inquiry(inquiry)
            .await
            .map_err(|e| ServiceError::Repository("Inquiries".to_string(), e.to_string()))
    }

    async fn list_inquiries(&self) -> Result<Vec<ChatInquiry>, ServiceError> {
        self.repository
            .get_inquiries()
            .await
            .map_err(|e| ServiceError::Repository("Inquiries".to_string(), e.to_string()))
    }

    async fn resolve_inquiry(&self, id: &str) -> Result<(), ServiceError> {
        self.repository
            .resolve_inquiry(id)
            .await
            .map_err(|e| ServiceError::NotFound(e.to_string()))
    }
}

#[async_trait]
impl RequestHandler<InquiryServiceRequest> for InquiryRequestHandler {
    async fn handle_request(&self, request: InquiryServiceRequest) {
        match request {
            InquiryServiceRequest::Save { inquiry, response } => {
                let inquiry = self.save_inquiry(inquiry).await;
                let _ = response.send(inquiry);
            }
            InquiryServiceRequest::List { response } => {
                let inquiries = self.list_inquiries().await;
                let _ = response.send(inquiries);
            }
            InquiryServiceRequest::Resolve { id, response } => {
                let result = self.resolve_inquiry(&id).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct InquiryService;

impl InquiryService {
    pub fn new() -> Self {
        InquiryService {}
    }
}

impl Service<InquiryServiceRequest, InquiryRequestHandler> for InquiryService {}
