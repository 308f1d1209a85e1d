use crate::domain::value::{TemplateId, TransmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCreated {
    pub id: TemplateId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmissionCreated {
    pub id: TransmissionId,
    pub total_accepted_recipients: u32,
    pub total_rejected_recipients: u32,
}
