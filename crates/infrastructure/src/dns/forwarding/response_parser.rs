use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::RData;
use rdns_domain::DomainError;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PtrResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// PTR targets from the answer section, in order, as fully qualified
    /// names (trailing dot included).
    pub ptr_names: Vec<String>,
}

impl PtrResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<PtrResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "Received a query instead of a response".to_string(),
            ));
        }

        let rcode = message.response_code();
        let truncated = message.truncated();

        // CNAME records may precede the PTR data (RFC 2317 classless delegation)
        let ptr_names: Vec<String> = message
            .answers()
            .iter()
            .filter_map(|record| match record.data() {
                RData::PTR(ptr) => Some(ptr.to_utf8()),
                _ => None,
            })
            .collect();

        debug!(
            rcode = ?rcode,
            answers = message.answers().len(),
            ptr_records = ptr_names.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(PtrResponse {
            id: message.id(),
            rcode,
            truncated,
            ptr_names,
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
