use ferrous_ptr_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PtrResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// PTR targets in answer order, absolute form.
    pub names: Vec<String>,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<PtrResponse, DomainError> {
        if response_bytes.len() < 12 {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response too short: {} bytes",
                response_bytes.len()
            )));
        }
        let id = u16::from_be_bytes([response_bytes[0], response_bytes[1]]);

        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut names = Vec::new();
        for record in message.answers() {
            if let RData::PTR(ptr) = record.data() {
                names.push(ptr.to_utf8());
            }
        }

        debug!(
            rcode = ?rcode,
            names = names.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(PtrResponse {
            id,
            rcode,
            truncated,
            names,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
