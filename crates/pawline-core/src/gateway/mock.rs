//! In-memory gateway doubles shared by the registry and synchronizer tests.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::account::AccountId;
use crate::inquiry::{Inquiry, InquiryId, InquiryStatus, PetAvailability, PetId};
use crate::thread::{Message, MessageId};

use super::{GatewayError, GatewayResult, InquiryGateway, MessageGateway};

/// Inquiry store double backed by a `Mutex<Vec<Inquiry>>`.
#[derive(Default)]
pub(crate) struct MockInquiryGateway {
    pub inquiries: Mutex<Vec<Inquiry>>,
    pub fetch_count: AtomicUsize,
    pub fetch_delay: Mutex<Option<Duration>>,
    pub fail_fetch: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_status: AtomicBool,
    pub fail_pet: AtomicBool,
    pub status_writes: Mutex<Vec<(InquiryId, InquiryStatus)>>,
    pub pet_writes: Mutex<Vec<(PetId, PetAvailability)>>,
}

impl MockInquiryGateway {
    pub fn with_inquiries(inquiries: Vec<Inquiry>) -> Self {
        Self {
            inquiries: Mutex::new(inquiries),
            ..Self::default()
        }
    }
}

#[async_trait]
impl InquiryGateway for MockInquiryGateway {
    async fn fetch_inquiries(&self, _account_id: &AccountId) -> GatewayResult<Vec<Inquiry>> {
        let delay = *self.fetch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(GatewayError::Network("fetch_inquiries down".into()));
        }
        Ok(self.inquiries.lock().unwrap().clone())
    }

    async fn create_inquiry(&self, inquiry: &Inquiry) -> GatewayResult<()> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected("create_inquiry rejected".into()));
        }
        self.inquiries.lock().unwrap().push(inquiry.clone());
        Ok(())
    }

    async fn set_inquiry_status(
        &self,
        inquiry_id: &InquiryId,
        status: InquiryStatus,
    ) -> GatewayResult<()> {
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(GatewayError::Denied("set_inquiry_status denied".into()));
        }
        self.status_writes
            .lock()
            .unwrap()
            .push((inquiry_id.clone(), status));
        if let Some(inquiry) = self
            .inquiries
            .lock()
            .unwrap()
            .iter_mut()
            .find(|i| &i.id == inquiry_id)
        {
            inquiry.status = status;
        }
        Ok(())
    }

    async fn set_pet_availability(
        &self,
        pet_id: &PetId,
        availability: PetAvailability,
    ) -> GatewayResult<()> {
        if self.fail_pet.load(Ordering::SeqCst) {
            return Err(GatewayError::Network("set_pet_availability down".into()));
        }
        self.pet_writes
            .lock()
            .unwrap()
            .push((pet_id.clone(), availability));
        Ok(())
    }
}

/// Message store double backed by a `Mutex<Vec<Message>>`.
#[derive(Default)]
pub(crate) struct MockMessageGateway {
    pub messages: Mutex<Vec<Message>>,
    pub next_id: AtomicUsize,
    pub fail_fetch: AtomicBool,
    pub fail_send: AtomicBool,
    pub fail_mark_read: AtomicBool,
    pub mark_read_calls: Mutex<Vec<(InquiryId, AccountId)>>,
}

impl MockMessageGateway {
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: Mutex::new(messages),
            ..Self::default()
        }
    }
}

#[async_trait]
impl MessageGateway for MockMessageGateway {
    async fn fetch_messages(&self, inquiry_id: &InquiryId) -> GatewayResult<Vec<Message>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(GatewayError::Network("fetch_messages down".into()));
        }
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| &m.inquiry_id == inquiry_id)
            .cloned()
            .collect())
    }

    async fn send_message(
        &self,
        inquiry_id: &InquiryId,
        sender_id: &AccountId,
        content: &str,
    ) -> GatewayResult<Message> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(GatewayError::Network("send_message down".into()));
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let message = Message {
            id: MessageId::new(format!("m{n}")),
            inquiry_id: inquiry_id.clone(),
            sender_id: sender_id.clone(),
            content: content.to_string(),
            created_at: Utc::now(),
            read: true,
        };
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn mark_messages_read(
        &self,
        inquiry_id: &InquiryId,
        account_id: &AccountId,
    ) -> GatewayResult<()> {
        if self.fail_mark_read.load(Ordering::SeqCst) {
            return Err(GatewayError::Network("mark_messages_read down".into()));
        }
        self.mark_read_calls
            .lock()
            .unwrap()
            .push((inquiry_id.clone(), account_id.clone()));
        Ok(())
    }
}
