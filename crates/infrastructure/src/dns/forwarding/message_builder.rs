//! DNS Message Builder
//!
//! Constructs PTR query messages in wire format using `hickory-proto`.

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use rdns_domain::DomainError;
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive PTR query for a reverse-lookup name.
    ///
    /// Returns the random message ID alongside the wire bytes so the caller
    /// can match the response.
    pub fn build_ptr_query(reverse_domain: &str) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(reverse_domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", reverse_domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::PTR);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_ptr_query() {
        let (id, bytes) = MessageBuilder::build_ptr_query("4.4.8.8.in-addr.arpa").unwrap();

        // DNS header is always 12 bytes, plus question section
        assert!(bytes.len() > 12, "DNS message too short: {} bytes", bytes.len());

        let wire_id = u16::from_be_bytes([bytes[0], bytes[1]]);
        assert_eq!(wire_id, id, "Wire ID should match returned ID");

        // Byte 2: QR(1) + Opcode(4) + AA(1) + TC(1) + RD(1)
        assert_eq!(bytes[2] & 0x01, 0x01, "RD flag should be set");
        assert_eq!(bytes[2] & 0x80, 0x00, "QR flag should be clear");
    }

    #[test]
    fn test_ptr_query_question() {
        let (_, bytes) = MessageBuilder::build_ptr_query(
            "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa",
        )
        .unwrap();

        let message = Message::from_vec(&bytes).unwrap();
        let query = &message.queries()[0];
        assert_eq!(query.query_type(), RecordType::PTR);
        assert_eq!(query.query_class(), DNSClass::IN);
        assert!(query.name().to_utf8().ends_with("ip6.arpa"));
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let label = "a".repeat(64);
        let result = MessageBuilder::build_ptr_query(&format!("{}.in-addr.arpa", label));
        assert!(matches!(result, Err(DomainError::InvalidDomainName(_))));
    }
}
